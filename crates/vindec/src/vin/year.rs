//! Model year from the tenth VIN character.

/// Map a position-10 year code to a model year.
///
/// Letters `A`-`Y` cover 2010-2030 (skipping `I`, `O`, `Q`, `U`, `Z`) and
/// digits `1`-`9` cover 2001-2009. The 30-year cycle is not disambiguated:
/// `A` is always 2010, never 1980. Any other code yields `None`.
#[must_use]
pub fn model_year(code: char) -> Option<u16> {
    let year = match code.to_ascii_uppercase() {
        'A' => 2010,
        'B' => 2011,
        'C' => 2012,
        'D' => 2013,
        'E' => 2014,
        'F' => 2015,
        'G' => 2016,
        'H' => 2017,
        'J' => 2018,
        'K' => 2019,
        'L' => 2020,
        'M' => 2021,
        'N' => 2022,
        'P' => 2023,
        'R' => 2024,
        'S' => 2025,
        'T' => 2026,
        'V' => 2027,
        'W' => 2028,
        'X' => 2029,
        'Y' => 2030,
        '1' => 2001,
        '2' => 2002,
        '3' => 2003,
        '4' => 2004,
        '5' => 2005,
        '6' => 2006,
        '7' => 2007,
        '8' => 2008,
        '9' => 2009,
        _ => return None,
    };
    Some(year)
}
