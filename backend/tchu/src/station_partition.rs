use crate::error::{ensure, Result};
use crate::station::Station;

/// Answers whether two stations are linked by a player's claimed routes.
pub trait StationConnectivity {
    fn connected(&self, s1: Station, s2: Station) -> bool;
}

/// Flattened partition of the stations into connected groups.
///
/// Each station id maps directly to the representative of its group, so lookups are O(1).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StationPartition {
    representatives: Vec<usize>,
}

impl StationConnectivity for StationPartition {
    /// Stations outside of the partition's range are only connected to themselves.
    fn connected(&self, s1: Station, s2: Station) -> bool {
        match (
            self.representatives.get(s1.id()),
            self.representatives.get(s2.id()),
        ) {
            (Some(r1), Some(r2)) => r1 == r2,
            _ => s1.id() == s2.id(),
        }
    }
}

/// Union-find builder for a [`StationPartition`].
///
/// # Example
/// ```
/// use tchu::station::Station;
/// use tchu::station_partition::{StationConnectivity, StationPartitionBuilder};
///
/// let lausanne = Station::new(13, "Lausanne");
/// let fribourg = Station::new(9, "Fribourg");
/// let berne = Station::new(3, "Berne");
///
/// let mut builder = StationPartitionBuilder::new(51);
/// builder.connect(lausanne, fribourg)?.connect(fribourg, berne)?;
/// let partition = builder.build();
///
/// assert!(partition.connected(lausanne, berne));
/// # Ok::<(), tchu::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct StationPartitionBuilder {
    /// Parent links: a station is the representative of its group iff it is its own parent.
    parents: Vec<usize>,
}

impl StationPartitionBuilder {
    /// A builder where each of the `station_count` stations is alone in its group.
    pub fn new(station_count: usize) -> Self {
        Self {
            parents: (0..station_count).collect(),
        }
    }

    /// Merges the groups of both stations.
    ///
    /// Returns an `Err` if either station is outside of the builder's range.
    pub fn connect(&mut self, s1: Station, s2: Station) -> Result<&mut Self> {
        for station in [s1, s2] {
            ensure!(
                station.id() < self.parents.len(),
                "Cannot connect {} (id {}) in a partition of {} stations.",
                station,
                station.id(),
                self.parents.len()
            );
        }

        let r1 = self.representative(s1.id());
        let r2 = self.representative(s2.id());
        self.parents[r1] = r2;
        Ok(self)
    }

    pub fn build(&self) -> StationPartition {
        StationPartition {
            representatives: (0..self.parents.len())
                .map(|id| self.representative(id))
                .collect(),
        }
    }

    fn representative(&self, mut id: usize) -> usize {
        while self.parents[id] != id {
            id = self.parents[id];
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: usize) -> Station {
        Station::new(id, "Station")
    }

    #[test]
    fn stations_start_disconnected() {
        let partition = StationPartitionBuilder::new(5).build();

        assert!(partition.connected(station(2), station(2)));
        assert!(!partition.connected(station(1), station(2)));
    }

    #[test]
    fn connections_are_transitive() -> Result<()> {
        let mut builder = StationPartitionBuilder::new(10);
        builder
            .connect(station(0), station(1))?
            .connect(station(3), station(4))?
            .connect(station(1), station(4))?
            .connect(station(7), station(8))?;
        let partition = builder.build();

        assert!(partition.connected(station(0), station(3)));
        assert!(partition.connected(station(4), station(0)));
        assert!(partition.connected(station(8), station(7)));
        assert!(!partition.connected(station(0), station(7)));
        assert!(!partition.connected(station(2), station(9)));
        Ok(())
    }

    #[test]
    fn long_chains_are_flattened() -> Result<()> {
        let mut builder = StationPartitionBuilder::new(50);
        for id in 0..49 {
            builder.connect(station(id), station(id + 1))?;
        }
        let partition = builder.build();

        assert!(partition.connected(station(0), station(49)));
        assert!(partition
            .representatives
            .iter()
            .all(|representative| *representative == partition.representatives[0]));
        Ok(())
    }

    #[test]
    fn out_of_range_stations_are_only_connected_to_themselves() {
        let partition = StationPartitionBuilder::new(3).build();

        assert!(partition.connected(station(10), station(10)));
        assert!(!partition.connected(station(10), station(11)));
        assert!(!partition.connected(station(0), station(10)));
    }

    #[test]
    fn connect_out_of_range_fails() {
        let mut builder = StationPartitionBuilder::new(3);

        let error = builder.connect(station(0), station(3)).unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn empty_partition() {
        let partition = StationPartitionBuilder::new(0).build();

        assert!(partition.connected(station(0), station(0)));
        assert!(!partition.connected(station(0), station(1)));
    }
}
