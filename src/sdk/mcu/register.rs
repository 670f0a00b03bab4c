use crate::{BIT_RNG, BM_CLR, BM_SET, BM_SET_MASK_FLD};

/// Generates a pair of free functions accessing a register at a fixed
/// absolute address. Under test both functions are mockable with `mry`.
macro_rules! regrw {
    ( $x:ident, $a:expr, $s:ty ) => {
        paste::paste! {
            #[cfg_attr(test, mry::mry)]
            pub fn [<read_ $x>]() -> $s {
                unsafe {
                    return core::ptr::read_volatile(($a) as usize as *const $s)
                }
            }

            #[cfg_attr(test, mry::mry)]
            pub fn [<write_ $x>](value: $s) {
                unsafe {
                    core::ptr::write_volatile(($a) as usize as *mut $s, value)
                }
            }
        }
    };
}

/// Generates named accessors for a register at `$off` inside a GPIO port
/// bank. The `bits` form also generates per-pin set/clear helpers for
/// registers with one bit per pin.
macro_rules! bankrw {
    ( $x:ident, $off:expr ) => {
        paste::paste! {
            #[inline(always)]
            pub fn [<read_ $x>](&self) -> u32 {
                self.bank.read($off)
            }

            #[inline(always)]
            pub fn [<write_ $x>](&self, value: u32) {
                self.bank.write($off, value)
            }
        }
    };
    ( $x:ident, $off:expr, bits ) => {
        bankrw!($x, $off);

        paste::paste! {
            pub fn [<set_ $x _bit>](&self, pin: u8) {
                let mut val = self.[<read_ $x>]();
                BM_SET!(val, pin);
                self.[<write_ $x>](val);
            }

            pub fn [<clear_ $x _bit>](&self, pin: u8) {
                let mut val = self.[<read_ $x>]();
                BM_CLR!(val, pin);
                self.[<write_ $x>](val);
            }
        }
    };
}

/****************************************************
 system control: begin  addr : 0x400FE000
 *****************************************************/
pub const SYSCTL_BASE_ADDR: u32 = 0x400F_E000;

// Run mode clock gating control register 2, one enable bit per GPIO port
regrw!(reg_sysctl_rcgc2, SYSCTL_BASE_ADDR + 0x108, u32);

/****************************************************
 gpio port banks (APB aperture)
 *****************************************************/
pub const GPIO_PORTA_BASE_ADDR: u32 = 0x4000_4000;
pub const GPIO_PORTB_BASE_ADDR: u32 = 0x4000_5000;
pub const GPIO_PORTC_BASE_ADDR: u32 = 0x4000_6000;
pub const GPIO_PORTD_BASE_ADDR: u32 = 0x4000_7000;
pub const GPIO_PORTE_BASE_ADDR: u32 = 0x4002_4000;
pub const GPIO_PORTF_BASE_ADDR: u32 = 0x4002_5000;

// GPIODATA is address-masked by bits [9:2]; 0x3FC exposes all eight pins
pub const GPIO_DATA_OFFSET: u32 = 0x3FC;
pub const GPIO_DIR_OFFSET: u32 = 0x400;
pub const GPIO_AFSEL_OFFSET: u32 = 0x420;
pub const GPIO_PUR_OFFSET: u32 = 0x510;
pub const GPIO_PDR_OFFSET: u32 = 0x514;
pub const GPIO_DEN_OFFSET: u32 = 0x51C;
pub const GPIO_LOCK_OFFSET: u32 = 0x520;
pub const GPIO_CR_OFFSET: u32 = 0x524;
pub const GPIO_AMSEL_OFFSET: u32 = 0x528;
pub const GPIO_PCTL_OFFSET: u32 = 0x52C;

/// Writing this to GPIOLOCK unlocks GPIOCR ("LOCK" in ASCII).
pub const GPIO_LOCK_KEY: u32 = 0x4C4F_434B;

/// Width of one PMCx field in GPIOPCTL.
pub const GPIO_PCTL_FIELD_BITS: u32 = 4;
pub const GPIO_PCTL_FIELD_MASK: u32 = BIT_RNG!(0, 3);

/// Raw 32-bit access to one GPIO port register bank.
///
/// Offsets are relative to the bank base. Implementations must perform the
/// access exactly once and in program order, since several registers have
/// side effects (GPIOLOCK) or gate later writes (GPIOCR).
pub trait RegisterBank {
    fn read(&self, offset: u32) -> u32;
    fn write(&self, offset: u32, value: u32);
}

/// Memory-mapped register bank at a fixed physical base address.
pub struct MmioBank {
    base: u32,
}

impl MmioBank {
    /// # Safety
    ///
    /// `base` must be the base address of a GPIO port bank, and no other code
    /// may access that bank concurrently.
    pub const unsafe fn new(base: u32) -> Self {
        Self { base }
    }

    pub const fn base(&self) -> u32 {
        self.base
    }
}

impl RegisterBank for MmioBank {
    #[inline(always)]
    fn read(&self, offset: u32) -> u32 {
        unsafe { core::ptr::read_volatile((self.base + offset) as usize as *const u32) }
    }

    #[inline(always)]
    fn write(&self, offset: u32, value: u32) {
        unsafe { core::ptr::write_volatile((self.base + offset) as usize as *mut u32, value) }
    }
}

/// Named view over the registers of one GPIO port bank.
pub struct PortRegisters<'a, B: RegisterBank> {
    bank: &'a B,
}

impl<'a, B: RegisterBank> PortRegisters<'a, B> {
    pub fn new(bank: &'a B) -> Self {
        Self { bank }
    }

    bankrw!(data, GPIO_DATA_OFFSET, bits);
    bankrw!(dir, GPIO_DIR_OFFSET, bits);
    bankrw!(afsel, GPIO_AFSEL_OFFSET, bits);
    bankrw!(pur, GPIO_PUR_OFFSET, bits);
    bankrw!(pdr, GPIO_PDR_OFFSET, bits);
    bankrw!(den, GPIO_DEN_OFFSET, bits);
    bankrw!(lock, GPIO_LOCK_OFFSET);
    bankrw!(cr, GPIO_CR_OFFSET, bits);
    bankrw!(amsel, GPIO_AMSEL_OFFSET, bits);
    bankrw!(pctl, GPIO_PCTL_OFFSET);

    /// Replaces the PMCx field of `pin` in GPIOPCTL with `value`.
    ///
    /// The field is cleared before the new value is ORed in, so no bits of a
    /// previous function survive. Exactly one write is issued.
    pub fn set_pctl_field(&self, pin: u8, value: u32) {
        let shift = pin as u32 * GPIO_PCTL_FIELD_BITS;
        let mut val = self.read_pctl();
        BM_SET_MASK_FLD!(val, GPIO_PCTL_FIELD_MASK << shift, value << shift);
        self.write_pctl(val);
    }

    pub fn pctl_field(&self, pin: u8) -> u32 {
        (self.read_pctl() >> (pin as u32 * GPIO_PCTL_FIELD_BITS)) & GPIO_PCTL_FIELD_MASK
    }
}
