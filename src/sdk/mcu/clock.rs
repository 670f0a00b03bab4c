use crate::sdk::drivers::port::Port;
use crate::sdk::mcu::register::{read_reg_sysctl_rcgc2, write_reg_sysctl_rcgc2};
use crate::BM_SET;

/// Gates on the run-mode clock of a GPIO port.
///
/// Sets bit `port` in RCGC2 with a read-modify-write so that clocks of other
/// ports are left alone, then reads the register back once. The dummy read
/// gives the peripheral the few cycles it needs after clock gating before
/// its registers may be touched.
///
/// # Parameters
///
/// * `port` - Port whose clock to enable
///
/// # Notes
///
/// Enabling an already running port is harmless; the write keeps the bit set.
pub fn enable_port_clock(port: Port) {
    let mut val = read_reg_sysctl_rcgc2();
    BM_SET!(val, port.number());
    write_reg_sysctl_rcgc2(val);

    // settle
    let _ = read_reg_sysctl_rcgc2();
}
