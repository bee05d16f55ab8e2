//! Shift-column schema of the daily hour-meter history
//!
//! The history sheet has one column per unit and shift, named
//! `"<unit> - Shift <n>"`. [`ShiftSchema::resolve`] reads the header once and
//! keeps a `unit -> shift -> column index` map, so scans never split strings.

use std::collections::BTreeMap;

use crate::{Shift, UnitId};

/// Separator between the unit identifier and the shift label in a column name
pub const UNIT_SEPARATOR: &str = " - ";

/// Shift of a column label such as `"Shift 2"`
///
/// Only `Shift 1` to `Shift 3` match; `"Shift 4"`, `"Shift 10"` and free text
/// do not.
fn parse_shift_label(label: &str) -> Option<Shift> {
    let number = label.strip_prefix("Shift ")?;
    if number.len() != 1 {
        return None;
    }
    number.parse::<u8>().ok().and_then(Shift::from_number)
}

/// Resolved column index of every unit's shift readings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShiftSchema {
    units: BTreeMap<UnitId, [Option<usize>; 3]>,
}

impl ShiftSchema {
    /// Resolve a header row
    ///
    /// Every column containing the separator registers its prefix as a unit,
    /// even when the remainder is not a shift label; such units simply have no
    /// shift columns. When a column name repeats, the first occurrence wins.
    pub fn resolve(headers: &[String]) -> Self {
        let mut units: BTreeMap<UnitId, [Option<usize>; 3]> = BTreeMap::new();

        for (index, header) in headers.iter().enumerate() {
            let Some((unit, rest)) = header.split_once(UNIT_SEPARATOR) else {
                continue;
            };
            let slots = units.entry(unit.to_string()).or_default();
            if let Some(shift) = parse_shift_label(rest) {
                slots[shift.index()].get_or_insert(index);
            }
        }

        Self { units }
    }

    /// Unit identifiers in sorted order
    pub fn units(&self) -> impl Iterator<Item = &UnitId> {
        self.units.keys()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// Column index of a unit's shift, if the history has that column
    pub fn column(&self, unit: &str, shift: Shift) -> Option<usize> {
        self.units.get(unit).and_then(|slots| slots[shift.index()])
    }

    /// Present shift columns of a unit in scan order (Shift 3, 2, 1)
    pub fn scan_columns<'a>(&'a self, unit: &'a str) -> impl Iterator<Item = (Shift, usize)> + 'a {
        Shift::SCAN_ORDER
            .into_iter()
            .filter_map(move |shift| self.column(unit, shift).map(|col| (shift, col)))
    }
}
