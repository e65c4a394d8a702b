use crate::error::{ensure, Result};
use crate::station::Station;
use crate::station_partition::StationConnectivity;

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// A journey between two stations, worth `points` if both end up connected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Trip {
    from: Station,
    to: Station,
    points: u32,
}

impl Trip {
    /// Returns an `Err` if `points` is zero.
    pub fn new(from: Station, to: Station, points: u32) -> Result<Self> {
        ensure!(points > 0, "The trip from {} to {} must be worth some points.", from, to);

        Ok(Self { from, to, points })
    }

    pub(crate) const fn from_board(from: Station, to: Station, points: u32) -> Self {
        Self { from, to, points }
    }

    /// Every trip from one of `froms` to one of `tos`, all worth the same `points`.
    ///
    /// # Example
    /// ```
    /// use tchu::station::Station;
    /// use tchu::ticket::Trip;
    ///
    /// let berne = Station::new(3, "Berne");
    /// let italie = [Station::new(42, "Italie"), Station::new(43, "Italie")];
    ///
    /// let trips = Trip::all(&[berne], &italie, 8).unwrap();
    /// assert_eq!(trips.len(), 2);
    /// assert!(trips.iter().all(|trip| trip.from() == berne));
    /// ```
    pub fn all(froms: &[Station], tos: &[Station], points: u32) -> Result<Vec<Trip>> {
        ensure!(
            !froms.is_empty() && !tos.is_empty(),
            "Cannot build trips without both departure and arrival stations."
        );

        froms
            .iter()
            .flat_map(|from| tos.iter().map(move |to| Trip::new(*from, *to, points)))
            .collect()
    }

    #[inline]
    pub fn from(&self) -> Station {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Station {
        self.to
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Positive points if the trip is completed according to `connectivity`, negative otherwise.
    pub fn points_for(&self, connectivity: &impl StationConnectivity) -> i32 {
        let points = self.points as i32;
        if connectivity.connected(self.from, self.to) {
            points
        } else {
            -points
        }
    }
}

/// Up to a handful of trips fit inline; country tickets spill to the heap.
pub(crate) type Trips = SmallVec<[Trip; 4]>;

/// A destination card: one or more trips sharing the same departure.
///
/// A ticket is worth the best score among its trips. Tickets are compared and ordered by
/// their text, which is how they are sorted in a player's hand.
#[derive(Clone, Debug)]
pub struct Ticket {
    trips: Trips,
    text: String,
}

impl Ticket {
    /// Returns an `Err` if `trips` is empty, or if the trips do not all start from stations
    /// bearing the same name.
    pub fn new(trips: Vec<Trip>) -> Result<Self> {
        let Some(first) = trips.first() else {
            return Err(crate::Error::invalid("A ticket needs at least one trip."));
        };
        let from_name = first.from().name();
        ensure!(
            trips.iter().all(|trip| trip.from().name() == from_name),
            "All trips of a ticket must start from {}.",
            from_name
        );

        Ok(Self::from_trips(trips.into_iter().collect()))
    }

    /// A ticket with a single trip.
    pub fn single(from: Station, to: Station, points: u32) -> Result<Self> {
        Ok(Self::from_trips(smallvec![Trip::new(from, to, points)?]))
    }

    /// Builds the ticket without validation, for board data checked by the map's tests.
    pub(crate) fn from_trips(trips: Trips) -> Self {
        let text = Self::compute_text(&trips);
        Self { trips, text }
    }

    fn compute_text(trips: &[Trip]) -> String {
        let from = trips.first().map(|trip| trip.from().name()).unwrap_or_default();
        let destinations: BTreeSet<String> = trips
            .iter()
            .map(|trip| format!("{} ({})", trip.to().name(), trip.points()))
            .collect();

        if destinations.len() == 1 {
            let destination = destinations.into_iter().collect::<String>();
            format!("{} - {}", from, destination)
        } else {
            let destinations: Vec<String> = destinations.into_iter().collect();
            format!("{} - {{{}}}", from, destinations.join(", "))
        }
    }

    #[inline]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Score of this ticket: the best of its trips' scores.
    pub fn points(&self, connectivity: &impl StationConnectivity) -> i32 {
        self.trips
            .iter()
            .map(|trip| trip.points_for(connectivity))
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Ticket {}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl std::hash::Hash for Ticket {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
