//! Built-in maps, addressable by name from the command line.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::grid::GridError;
use super::level::Level;

pub static MAPS: &[(&str, &str)] = &[
    (
        "e1m1",
        "\
1111111111111111
1P.............1
1..3333...222..1
1.....4......2.1
1..l..4..s...2.1
1..3333........1
1..........t...1
1...4...4....c.1
1113131113..3111
1.......3..s...1
1.......3......1
1.s.....3..y...1
1..t....1......1
1111111111111111
",
    ),
    (
        "arena",
        "\
1111111111
1P.......1
1..2..2..1
1........1
1..s..s..1
1........1
1..2..2..1
1........1
1111111111
",
    ),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| MAPS.iter().copied().collect());

/// Parse the built-in map `name`; `None` if no such map exists.
pub fn by_name(name: &str) -> Option<Result<Level, GridError>> {
    BY_NAME.get(name).map(|text| Level::parse(name, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_map_parses() {
        for (name, _) in MAPS {
            let lvl = by_name(name).unwrap().unwrap();
            assert!(lvl.enemy_count() > 0, "{name} has no enemies");
        }
        assert!(by_name("nope").is_none());
    }
}
