use crate::sdk::drivers::port::error::MODULE_ID;

pub const VENDOR_ID: u16 = 1000;

pub const SW_MAJOR_VERSION: u8 = 1;
pub const SW_MINOR_VERSION: u8 = 0;
pub const SW_PATCH_VERSION: u8 = 0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub vendor_id: u16,
    pub module_id: u16,
    pub sw_major_version: u8,
    pub sw_minor_version: u8,
    pub sw_patch_version: u8,
}

impl VersionInfo {
    pub const CURRENT: VersionInfo = VersionInfo {
        vendor_id: VENDOR_ID,
        module_id: MODULE_ID,
        sw_major_version: SW_MAJOR_VERSION,
        sw_minor_version: SW_MINOR_VERSION,
        sw_patch_version: SW_PATCH_VERSION,
    };
}
