//! Register descriptors and the naming strategies used to render them.
//!
//! A [`RegisterDesc`] identifies a bit range of a 64-bit register slot. The slot is
//! named by the pair `(flags, local_id)`: ids are deliberately not unique on their
//! own so user registers can use the full 64-bit space, which means every identity
//! comparison must take the flags into account as well.

use std::fmt;

use ahash::AHashMap;
use bitflags::bitflags;

use crate::arch::error::RegisterError;
use crate::math::{self, BitCount};

bitflags! {
    /// Properties of a register. The empty set is a plain read/write virtual register.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct RegisterFlags: u8 {
        const PHYSICAL = 1 << 0;
        /// Temporary scoped to the current basic block.
        const LOCAL = 1 << 1;
        const FLAGS = 1 << 2;
        const STACK_POINTER = 1 << 3;
        /// May change spontaneously, e.g. a timestamp counter.
        const VOLATILE = 1 << 4;
        const READ_ONLY = 1 << 5;
    }
}

impl RegisterFlags {
    pub const VIRTUAL: Self = Self::empty();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterDesc {
    local_id: u64,
    flags: RegisterFlags,
    bit_count: BitCount,
    bit_offset: BitCount,
}

/// CPU flags register of the virtual machine.
pub const REG_FLAGS: RegisterDesc = RegisterDesc::new(
    RegisterFlags::from_bits_retain(RegisterFlags::PHYSICAL.bits() | RegisterFlags::FLAGS.bits()),
    0,
    64,
    0,
);

/// Stack pointer of the virtual machine.
pub const REG_SP: RegisterDesc = RegisterDesc::new(
    RegisterFlags::from_bits_retain(
        RegisterFlags::PHYSICAL.bits() | RegisterFlags::STACK_POINTER.bits(),
    ),
    0,
    64,
    0,
);

impl RegisterDesc {
    /// Builds a descriptor, panicking if it violates the register invariants.
    ///
    /// Invalid descriptors used in `const` items fail to compile.
    pub const fn new(
        flags: RegisterFlags,
        local_id: u64,
        bit_count: BitCount,
        bit_offset: BitCount,
    ) -> Self {
        match Self::try_new(flags, local_id, bit_count, bit_offset) {
            Ok(desc) => desc,
            Err(err) => panic!("{}", err.as_str()),
        }
    }

    pub const fn try_new(
        flags: RegisterFlags,
        local_id: u64,
        bit_count: BitCount,
        bit_offset: BitCount,
    ) -> Result<Self, RegisterError> {
        let desc = Self {
            local_id,
            flags,
            bit_count,
            bit_offset,
        };
        match desc.validate() {
            Ok(()) => Ok(desc),
            Err(err) => Err(err),
        }
    }

    /// Full-width descriptor at offset zero.
    pub const fn full(flags: RegisterFlags, local_id: u64) -> Self {
        Self::new(flags, local_id, 64, 0)
    }

    const fn validate(&self) -> Result<(), RegisterError> {
        if self.bit_count == 0 {
            return Err(RegisterError::ZeroWidth);
        }
        if self.bit_count as u16 + self.bit_offset as u16 > 64 {
            return Err(RegisterError::OutOfRange {
                bit_count: self.bit_count,
                bit_offset: self.bit_offset,
            });
        }
        if (self.is_stack_pointer() || self.is_flags())
            && (self.is_volatile() || self.is_read_only() || !self.is_physical())
        {
            return Err(RegisterError::InvalidSpecialRegister);
        }
        if self.is_physical() && self.is_local() {
            return Err(RegisterError::PhysicalLocal);
        }
        Ok(())
    }

    pub const fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    const fn has(&self, flag: RegisterFlags) -> bool {
        self.flags.bits() & flag.bits() != 0
    }

    pub const fn flags(&self) -> RegisterFlags {
        self.flags
    }

    pub const fn local_id(&self) -> u64 {
        self.local_id
    }

    pub const fn bit_count(&self) -> BitCount {
        self.bit_count
    }

    pub const fn bit_offset(&self) -> BitCount {
        self.bit_offset
    }

    pub const fn is_flags(&self) -> bool {
        self.has(RegisterFlags::FLAGS)
    }

    pub const fn is_local(&self) -> bool {
        self.has(RegisterFlags::LOCAL)
    }

    pub const fn is_global(&self) -> bool {
        !self.is_local()
    }

    pub const fn is_virtual(&self) -> bool {
        !self.is_physical()
    }

    pub const fn is_physical(&self) -> bool {
        self.has(RegisterFlags::PHYSICAL)
    }

    pub const fn is_volatile(&self) -> bool {
        self.has(RegisterFlags::VOLATILE)
    }

    pub const fn is_read_only(&self) -> bool {
        self.has(RegisterFlags::READ_ONLY)
    }

    pub const fn is_stack_pointer(&self) -> bool {
        self.has(RegisterFlags::STACK_POINTER)
    }

    /// Bits this register occupies within its 64-bit slot.
    pub const fn mask(&self) -> u64 {
        math::fill(self.bit_count, self.bit_offset)
    }

    /// Whether both descriptors name the same slot and share at least one bit.
    pub const fn overlaps(&self, other: &RegisterDesc) -> bool {
        if self.local_id != other.local_id || self.flags.bits() != other.flags.bits() {
            return false;
        }
        self.mask() & other.mask() != 0
    }

    /// Another view of the same slot, e.g. the low byte of a full register.
    pub const fn select(
        &self,
        bit_count: BitCount,
        bit_offset: BitCount,
    ) -> Result<Self, RegisterError> {
        Self::try_new(self.flags, self.local_id, bit_count, bit_offset)
    }

    /// Renders the register, delegating plain physical and virtual names to `namer`.
    pub fn format_with(&self, namer: &dyn RegisterNamer) -> String {
        let mut prefix = String::new();
        if self.is_volatile() {
            prefix.push('?');
        }
        if self.is_read_only() {
            prefix.push_str("&&");
        }

        // A non-64 width overrides the offset suffix; only one of them is shown.
        let mut suffix = String::new();
        if self.bit_offset != 0 {
            suffix = format!("@{}", self.bit_offset);
        }
        if self.bit_count != 64 {
            suffix = format!(":{}", self.bit_count);
        }

        let body = if self.is_flags() {
            format!("$flags{suffix}")
        } else if self.is_stack_pointer() {
            format!("$sp{suffix}")
        } else if self.is_local() {
            format!("t{}{suffix}", self.local_id)
        } else {
            let class = if self.is_physical() {
                RegisterClass::Physical
            } else {
                RegisterClass::Virtual
            };
            namer.name(class, self.local_id, self.bit_count, self.bit_offset, &suffix)
        };
        prefix + &body
    }
}

impl fmt::Display for RegisterDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&DefaultNamer))
    }
}

/// Class of a register handed to a [`RegisterNamer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterClass {
    Physical,
    Virtual,
}

/// Naming strategy for global registers.
///
/// The positional `suffix` is precomputed so a strategy that knows a dedicated
/// name for the selected sub-range can drop it.
pub trait RegisterNamer {
    fn name(
        &self,
        class: RegisterClass,
        id: u64,
        bit_count: BitCount,
        bit_offset: BitCount,
        suffix: &str,
    ) -> String;
}

/// `r<id>` for physical registers, `vr<id>` for virtual ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamer;

impl RegisterNamer for DefaultNamer {
    fn name(
        &self,
        class: RegisterClass,
        id: u64,
        _bit_count: BitCount,
        _bit_offset: BitCount,
        suffix: &str,
    ) -> String {
        match class {
            RegisterClass::Physical => format!("r{id}{suffix}"),
            RegisterClass::Virtual => format!("vr{id}{suffix}"),
        }
    }
}

/// Table of host names for physical registers, such as `rax`/`eax`/`ah`.
///
/// Exact sub-range names win over the full register name plus suffix; anything
/// not in the table falls back to [`DefaultNamer`].
#[derive(Debug, Clone, Default)]
pub struct TableNamer {
    registers: AHashMap<u64, String>,
    views: AHashMap<(u64, BitCount, BitCount), String>,
}

impl TableNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the full physical register `id`.
    pub fn with_register(mut self, id: u64, name: impl Into<String>) -> Self {
        self.registers.insert(id, name.into());
        self
    }

    /// Names the `bit_count` bits at `bit_offset` of physical register `id`.
    pub fn with_view(
        mut self,
        id: u64,
        bit_count: BitCount,
        bit_offset: BitCount,
        name: impl Into<String>,
    ) -> Self {
        self.views.insert((id, bit_count, bit_offset), name.into());
        self
    }
}

impl RegisterNamer for TableNamer {
    fn name(
        &self,
        class: RegisterClass,
        id: u64,
        bit_count: BitCount,
        bit_offset: BitCount,
        suffix: &str,
    ) -> String {
        if class == RegisterClass::Physical {
            if let Some(view) = self.views.get(&(id, bit_count, bit_offset)) {
                return view.clone();
            }
            if let Some(register) = self.registers.get(&id) {
                return format!("{register}{suffix}");
            }
        }
        DefaultNamer.name(class, id, bit_count, bit_offset, suffix)
    }
}
