#[macro_export]
macro_rules! BIT {
    ( $x:expr ) => {
        1u32 << $x
    };
}

#[macro_export]
macro_rules! BIT_MASK_LEN {
    ( $x:expr ) => {
        $crate::BIT!($x) - 1
    };
}

// bits range: BIT_RNG(4, 7)  0b11110000,  start from 4, end at 7
#[macro_export]
macro_rules! BIT_RNG {
    ( $s:expr, $e:expr ) => {
        $crate::BIT_MASK_LEN!($e - $s + 1) << $s
    };
}

#[macro_export]
macro_rules! BM_SET {
    ( $v:expr, $b:expr ) => {
        $v |= $crate::BIT!($b)
    };
}

#[macro_export]
macro_rules! BM_CLR {
    ( $v:expr, $b:expr ) => {
        $v &= !$crate::BIT!($b)
    };
}

// Replace the field selected by mask `$m` with `$val` (already shifted into place)
#[macro_export]
macro_rules! BM_SET_MASK_FLD {
    ( $v:expr, $m:expr, $val:expr ) => {
        $v = ($v & !($m)) | (($val) & ($m))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_bit_helpers() {
        assert_eq!(BIT!(7), 0x80);
        assert_eq!(BIT_RNG!(4, 7), 0xF0);
        assert_eq!(BIT_RNG!(28, 31), 0xF000_0000);

        let mut v = 0u32;
        BM_SET!(v, 3);
        assert_eq!(v, 0b1000);
        BM_CLR!(v, 3);
        assert_eq!(v, 0);

        let mut ctl = 0xFFFF_FFFFu32;
        BM_SET_MASK_FLD!(ctl, BIT_RNG!(8, 11), 0x3 << 8);
        assert_eq!(ctl, 0xFFFF_F3FF);
    }
}
