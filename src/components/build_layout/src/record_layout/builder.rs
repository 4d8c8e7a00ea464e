use super::{MAX_OBJECT_SIZE, bitfield::BitfieldAllocator};
use crate::{
    BitfieldPlacement, LayoutError, LayoutErrorKind, LayoutResult, MemberLayout, PaddingRegion,
    TypeLayoutCache,
};
use aggregate::{Aggregate, Member};
use data_units::{BitUnits, ByteUnits};
use diagnostics::{Location, WarningDiagnostic};
use target_layout::TypeLayout;

/// Lays out the members of a single aggregate in declaration order
#[derive(Debug)]
pub struct RecordLayoutBuilder<'a, 'env> {
    pub type_layout_cache: &'a TypeLayoutCache<'env>,
    pub aggregate: &'a Aggregate,

    // Byte offset just past the data placed so far
    pub data_size: ByteUnits,

    pub alignment: ByteUnits,
    pub unpacked_alignment: ByteUnits,
    pub packed: bool,
    pub is_union: bool,
    pub has_packed_field: bool,

    // Storage unit of the previous member if it was a bitfield
    pub open_unit: Option<BitfieldAllocator>,

    pub members: Vec<MemberLayout>,
    pub padding: Vec<PaddingRegion>,
}

impl<'a, 'env> RecordLayoutBuilder<'a, 'env> {
    /// Computes the layout of `aggregate`.
    ///
    /// `visiting` holds the names of registered records whose layout is in
    /// progress, including `aggregate` itself when it is one of them.
    pub fn generate(
        type_layout_cache: &'a TypeLayoutCache<'env>,
        aggregate: &'a Aggregate,
        visiting: &mut Vec<String>,
    ) -> Result<LayoutResult, LayoutError> {
        let mut builder = Self::new(type_layout_cache, aggregate);
        builder.layout(visiting)?;
        builder.finish()
    }

    pub fn new(type_layout_cache: &'a TypeLayoutCache<'env>, aggregate: &'a Aggregate) -> Self {
        Self {
            type_layout_cache,
            aggregate,
            data_size: ByteUnits::ZERO,
            alignment: ByteUnits::ONE,
            unpacked_alignment: ByteUnits::ONE,
            packed: aggregate.is_packed,
            is_union: aggregate.kind.is_union(),
            has_packed_field: false,
            open_unit: None,
            members: Vec::with_capacity(aggregate.len()),
            padding: Vec::new(),
        }
    }

    fn layout(&mut self, visiting: &mut Vec<String>) -> Result<(), LayoutError> {
        if let Some(duplicate) = self.aggregate.duplicate_member_names().first() {
            return Err(LayoutErrorKind::DuplicateMember.at(self.location_of(duplicate)));
        }

        let aggregate = self.aggregate;

        for (i, member) in aggregate.members.iter().enumerate() {
            let location = self.location_of(&member.name);
            let type_layout = self
                .type_layout_cache
                .resolve(&member.ty, &location, visiting)?;

            match member.bit_width {
                Some(width) => {
                    let width = self.validate_bitfield(member, &type_layout, width, location)?;
                    self.layout_bitfield(member, &type_layout, width, i)?;
                }
                None => self.layout_field(member, &type_layout, i)?,
            }
        }

        Ok(())
    }

    fn validate_bitfield(
        &self,
        member: &Member,
        type_layout: &TypeLayout,
        width: u32,
        location: Location,
    ) -> Result<BitUnits, LayoutError> {
        if !type_layout.class.is_integer() || !member.ty.is_scalar() {
            return Err(LayoutErrorKind::BitfieldNotInteger {
                ty: member.ty.to_string(),
            }
            .at(location));
        }

        let max = type_layout.width.to_bits();
        let bits = BitUnits::from(width);

        if bits.is_zero() || bits > max {
            return Err(LayoutErrorKind::InvalidBitfieldWidth { width, max }.at(location));
        }

        Ok(bits)
    }

    fn layout_field(
        &mut self,
        member: &Member,
        type_layout: &TypeLayout,
        field_i: usize,
    ) -> Result<(), LayoutError> {
        if self.is_union {
            self.place_in_union(member, type_layout, None);
            return Ok(());
        }

        self.close_bitfield_unit()?;

        let unpadded_field_offset = self.data_size;
        let field_offset = self.next_offset(type_layout.alignment, Some(&member.name))?;

        if field_offset > unpadded_field_offset {
            self.padding.push(PaddingRegion::bytes(
                unpadded_field_offset,
                field_offset - unpadded_field_offset,
            ));

            if self.diagnostics_flags().warn_padded_field {
                self.warn(
                    format!(
                        "Padded field of '{}' at index {} with {}",
                        self.aggregate.name,
                        field_i,
                        field_offset - unpadded_field_offset
                    ),
                    Some(&member.name),
                );
            }
        }

        self.members.push(MemberLayout {
            name: member.name.clone(),
            offset: field_offset,
            width: type_layout.width,
            alignment: type_layout.alignment,
            bitfield: None,
        });

        self.data_size = self.bounded(
            field_offset.checked_add(type_layout.width),
            Some(&member.name),
        )?;
        self.update_alignment(type_layout.alignment);
        Ok(())
    }

    fn layout_bitfield(
        &mut self,
        member: &Member,
        type_layout: &TypeLayout,
        width: BitUnits,
        field_i: usize,
    ) -> Result<(), LayoutError> {
        let unit_size = type_layout.width;

        if self.is_union {
            let bit_offset = match self.policy().direction {
                target::BitfieldDirection::LowToHigh => BitUnits::ZERO,
                target::BitfieldDirection::HighToLow => unit_size.to_bits() - width,
            };

            self.place_in_union(
                member,
                type_layout,
                Some(BitfieldPlacement {
                    bit_offset,
                    bit_width: width,
                }),
            );
            return Ok(());
        }

        let mut unit = match self.open_unit.take() {
            Some(unit) if unit.can_fit(unit_size, width) => unit,
            previous => {
                if let Some(previous) = previous {
                    self.close_unit(previous)?;
                }
                self.open_bitfield_unit(member, type_layout, field_i)?
            }
        };

        let allocation = unit.allocate(width);

        if let Some(skipped) = allocation.skipped {
            self.padding.push(skipped);

            if self.diagnostics_flags().warn_padded_bitfield {
                self.warn(
                    format!(
                        "Padded bitfield of '{}' at index {} with {}",
                        self.aggregate.name, field_i, skipped.length
                    ),
                    Some(&member.name),
                );
            }
        }

        self.members.push(MemberLayout {
            name: member.name.clone(),
            offset: unit.start(),
            width: unit_size,
            alignment: type_layout.alignment,
            bitfield: Some(BitfieldPlacement {
                bit_offset: allocation.bit_offset,
                bit_width: width,
            }),
        });

        self.open_unit = Some(unit);
        self.update_alignment(type_layout.alignment);
        Ok(())
    }

    fn open_bitfield_unit(
        &mut self,
        member: &Member,
        type_layout: &TypeLayout,
        field_i: usize,
    ) -> Result<BitfieldAllocator, LayoutError> {
        let unpadded_offset = self.data_size;
        let unit_offset = self.next_offset(type_layout.alignment, Some(&member.name))?;

        if unit_offset > unpadded_offset {
            self.padding.push(PaddingRegion::bytes(
                unpadded_offset,
                unit_offset - unpadded_offset,
            ));

            if self.diagnostics_flags().warn_padded_bitfield {
                self.warn(
                    format!(
                        "Padded bitfield of '{}' at index {} with {}",
                        self.aggregate.name,
                        field_i,
                        unit_offset - unpadded_offset
                    ),
                    Some(&member.name),
                );
            }
        }

        Ok(BitfieldAllocator::open(
            unit_offset,
            type_layout.width,
            self.policy(),
        ))
    }

    fn close_unit(&mut self, unit: BitfieldAllocator) -> Result<(), LayoutError> {
        let (end, unused) = unit.close();
        self.padding.extend(unused);
        self.data_size = self.bounded(Some(end), None)?;
        Ok(())
    }

    fn close_bitfield_unit(&mut self) -> Result<(), LayoutError> {
        match self.open_unit.take() {
            Some(unit) => self.close_unit(unit),
            None => Ok(()),
        }
    }

    fn place_in_union(
        &mut self,
        member: &Member,
        type_layout: &TypeLayout,
        bitfield: Option<BitfieldPlacement>,
    ) {
        self.members.push(MemberLayout {
            name: member.name.clone(),
            offset: ByteUnits::ZERO,
            width: type_layout.width,
            alignment: type_layout.alignment,
            bitfield,
        });

        self.data_size = self.data_size.max(type_layout.width);
        self.update_alignment(type_layout.alignment);
    }

    // Offset the next field or storage unit will be placed at
    fn next_offset(
        &mut self,
        alignment: ByteUnits,
        member: Option<&str>,
    ) -> Result<ByteUnits, LayoutError> {
        let unpacked_offset = self.bounded(self.data_size.checked_align_to(alignment), member)?;

        if !self.packed {
            return Ok(unpacked_offset);
        }

        if unpacked_offset != self.data_size {
            self.has_packed_field = true;
        }

        Ok(self.data_size)
    }

    fn update_alignment(&mut self, new_alignment: ByteUnits) {
        self.unpacked_alignment = self.unpacked_alignment.max(new_alignment);

        if !self.packed && new_alignment > self.alignment {
            assert!(new_alignment.is_power_of_2());
            self.alignment = new_alignment;
        }
    }

    fn finish(mut self) -> Result<LayoutResult, LayoutError> {
        self.close_bitfield_unit()?;

        // Round size of record up to its alignment, which gives the stride address
        let unpadded_size = self.data_size;
        let unpacked_size = unpadded_size.checked_align_to(self.unpacked_alignment);
        let size = self.bounded(unpadded_size.checked_align_to(self.alignment), None)?;

        if size > unpadded_size {
            self.padding
                .push(PaddingRegion::bytes(unpadded_size, size - unpadded_size));

            if self.diagnostics_flags().warn_padded_record {
                self.warn(
                    format!(
                        "Padded type '{}', with {} to alignment boundary",
                        self.aggregate.name,
                        (size - unpadded_size).to_bits()
                    ),
                    None,
                );
            }
        }

        if self.packed
            && unpacked_size == Some(size)
            && !self.has_packed_field
            && self.diagnostics_flags().warn_unnecessary_pack
        {
            self.warn(
                format!("Unnecessarily packed type '{}'", self.aggregate.name),
                None,
            );
        }

        self.padding.sort_by_key(|padding| padding.offset);

        Ok(LayoutResult {
            name: self.aggregate.name.clone(),
            kind: self.aggregate.kind,
            is_packed: self.packed,
            members: self.members,
            padding: self.padding,
            size,
            alignment: self.alignment,
        })
    }

    // Rejects sizes and offsets that overflowed or exceed the largest object
    fn bounded(
        &self,
        size: Option<ByteUnits>,
        member: Option<&str>,
    ) -> Result<ByteUnits, LayoutError> {
        size.filter(|size| *size <= MAX_OBJECT_SIZE)
            .ok_or_else(|| LayoutErrorKind::SizeOverflow.at(self.location(member)))
    }

    fn policy(&self) -> target::BitfieldPolicy {
        self.type_layout_cache.catalog.profile().bitfield
    }

    fn location_of(&self, member: &str) -> Location {
        Location::member(&self.aggregate.name, member)
    }

    fn diagnostics_flags(&self) -> &diagnostics::DiagnosticFlags {
        self.type_layout_cache.diagnostics.flags()
    }

    fn location(&self, member: Option<&str>) -> Location {
        match member {
            Some(member) => self.location_of(member),
            None => Location::record(&self.aggregate.name),
        }
    }

    fn warn(&self, message: String, member: Option<&str>) {
        self.type_layout_cache
            .diagnostics
            .push(WarningDiagnostic::new(message, self.location(member)));
    }
}

