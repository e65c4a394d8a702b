use std::fmt;

/// A station of the board.
///
/// Stations are identified by their `id`, which is unique and dense over the board
/// (`0..map::STATION_COUNT`). Several stations may share a name: this is the case for
/// the entry points of a neighboring country, which all bear the country's name.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Station {
    id: usize,
    name: &'static str,
}

impl Station {
    pub const fn new(id: usize, name: &'static str) -> Self {
        Self { id, name }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_accessors() {
        let station = Station::new(13, "Lausanne");
        assert_eq!(station.id(), 13);
        assert_eq!(station.name(), "Lausanne");
        assert_eq!(station.to_string(), "Lausanne");
    }

    #[test]
    fn stations_with_same_name_are_distinct() {
        assert_ne!(Station::new(34, "Allemagne"), Station::new(35, "Allemagne"));
    }
}
