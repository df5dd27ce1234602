// ABOUTME: This module provides macros to reduce boilerplate in TPDU first-octet handling
// ABOUTME: Each TPDU kind declares its flag layout once and gets pack/unpack for free

/// Macro for declaring the flag set carried in a TPDU first octet
///
/// Every TPDU starts with one octet whose two low bits are the message type
/// indicator; the remaining bits are kind-specific flags. This macro takes a
/// per-kind table of `field: Type = shift, width;` entries and generates the
/// struct plus the bit packing in both directions.
///
/// # Arguments
/// * `$name` - The header struct name (e.g., SubmitHeader)
/// * `$field: $ty = $shift, $width` - One flag, its Rust type and bit position
///
/// # Generated code
/// - The struct itself with `Clone, Copy, Debug, Default, PartialEq, Eq`
/// - `pack(mti)` combining the message type indicator with every flag
/// - `unpack(octet)` extracting every flag, ignoring the indicator bits
///
/// Field types must implement `tpdu::header::HeaderBits`.
macro_rules! first_octet {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $shift:literal, $width:literal;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )+
        }

        impl $name {
            /// Pack the flags together with the message type indicator
            pub fn pack(&self, mti: u8) -> u8 {
                use $crate::tpdu::header::{BitField, HeaderBits};

                let mut octet = BitField::MTI.put(mti);
                $(
                    octet |= BitField::new($shift, $width).put(self.$field.to_bits());
                )+
                octet
            }

            /// Extract the flags from a first octet
            pub fn unpack(octet: u8) -> Self {
                use $crate::tpdu::header::{BitField, HeaderBits};

                Self {
                    $(
                        $field: <$ty as HeaderBits>::from_bits(
                            BitField::new($shift, $width).get(octet),
                        ),
                    )+
                }
            }
        }
    };
}
