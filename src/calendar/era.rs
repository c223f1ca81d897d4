// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * Era tables for each calendar family (spec.md §4.2's `getEra`/`getAbsoluteYear`).
 *
 * The spec names the operations but not the era values; the conventional
 * tables below are the uncontroversial choice for each calendar family
 * (DESIGN.md §2).
 */

use std::fmt;

/// A calendar era.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Era {
    BeforeCommonEra,
    CommonEra,
    AnnoMartyrum,
    AnnoHegirae,
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Era::BeforeCommonEra => "BCE",
            Era::CommonEra => "CE",
            Era::AnnoMartyrum => "AM",
            Era::AnnoHegirae => "AH",
        };
        f.write_str(name)
    }
}

/// Era/year-of-era split for the two-era Gregorian/Julian family.
pub(crate) fn gj_era(year: i32) -> Era {
    if year >= 1 { Era::CommonEra } else { Era::BeforeCommonEra }
}

pub(crate) fn gj_year_of_era(year: i32) -> i32 {
    if year >= 1 { year } else { 1 - year }
}

pub(crate) fn gj_absolute_year(year_of_era: i32, era: Era) -> i32 {
    match era {
        Era::CommonEra => year_of_era,
        Era::BeforeCommonEra => 1 - year_of_era,
        _ => year_of_era,
    }
}
