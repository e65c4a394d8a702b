use crate::route::Route;
use crate::station::Station;

use std::fmt;

/// A continuous path through a player's claimed routes.
///
/// A trail may go through a station several times, but never uses the same route twice.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Trail {
    /// Visited stations, in travel order. Empty for the empty trail.
    stations: Vec<Station>,
    routes: Vec<Route>,
    length: usize,
}

impl Trail {
    /// Finds a longest trail among `routes`.
    ///
    /// When several trails share the maximal length, the first one discovered wins: routes
    /// are explored in the given order, each one first from `station1` then from `station2`.
    ///
    /// # Example
    /// ```
    /// use tchu::route::{Level, Route};
    /// use tchu::station::Station;
    /// use tchu::trail::Trail;
    ///
    /// let lausanne = Station::new(13, "Lausanne");
    /// let fribourg = Station::new(9, "Fribourg");
    /// let berne = Station::new(3, "Berne");
    ///
    /// let routes = [
    ///     Route::new("BER_FRI_1", berne, fribourg, 1, Level::Overground, None)?,
    ///     Route::new("FRI_LAU_1", fribourg, lausanne, 3, Level::Overground, None)?,
    /// ];
    ///
    /// let trail = Trail::longest(&routes);
    /// assert_eq!(trail.length(), 4);
    /// assert_eq!(trail.to_string(), "Berne - Fribourg - Lausanne (4)");
    ///
    /// assert_eq!(Trail::longest(&[]).length(), 0);
    /// # Ok::<(), tchu::Error>(())
    /// ```
    pub fn longest(routes: &[Route]) -> Trail {
        let mut longest = Trail::default();
        let mut frontier: Vec<Trail> = routes
            .iter()
            .flat_map(|route| {
                [
                    Trail::single(*route, route.station1(), route.station2()),
                    Trail::single(*route, route.station2(), route.station1()),
                ]
            })
            .collect();

        while !frontier.is_empty() {
            let mut extended = Vec::new();

            for trail in frontier {
                if trail.length > longest.length {
                    longest = trail.clone();
                }

                let Some(end) = trail.station2() else {
                    continue;
                };
                for route in routes {
                    if trail.uses_stations_of(route) {
                        continue;
                    }

                    if route.station1() == end {
                        extended.push(trail.extended_with(*route, route.station2()));
                    } else if route.station2() == end {
                        extended.push(trail.extended_with(*route, route.station1()));
                    }
                }
            }

            frontier = extended;
        }

        longest
    }

    fn single(route: Route, from: Station, to: Station) -> Trail {
        Trail {
            stations: vec![from, to],
            routes: vec![route],
            length: route.length(),
        }
    }

    fn extended_with(&self, route: Route, to: Station) -> Trail {
        let mut trail = self.clone();
        trail.stations.push(to);
        trail.routes.push(route);
        trail.length += route.length();
        trail
    }

    /// Parallel routes count as the same route: a trail never goes twice between two stations.
    fn uses_stations_of(&self, route: &Route) -> bool {
        self.routes
            .iter()
            .any(|used| used.connects_same_stations(route))
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// First station of the trail, or `None` for the empty trail.
    pub fn station1(&self) -> Option<Station> {
        self.stations.first().copied()
    }

    /// Last station of the trail, or `None` for the empty trail.
    pub fn station2(&self) -> Option<Station> {
        self.stations.last().copied()
    }

    #[inline]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty trail)");
        }

        let stations: Vec<&str> = self.stations.iter().map(|station| station.name()).collect();
        write!(f, "{} ({})", stations.join(" - "), self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;
    use crate::route::Level;

    use pretty_assertions::assert_eq;

    const BER: Station = Station::new(3, "Berne");
    const FRI: Station = Station::new(9, "Fribourg");
    const LAU: Station = Station::new(13, "Lausanne");
    const NEU: Station = Station::new(19, "Neuchâtel");
    const SOL: Station = Station::new(26, "Soleure");
    const YVE: Station = Station::new(31, "Yverdon");
    const GEN: Station = Station::new(10, "Genève");

    fn route(id: &'static str, s1: Station, s2: Station, length: usize) -> Route {
        Route::new(id, s1, s2, length, Level::Overground, None).unwrap()
    }

    #[test]
    fn empty_trail() {
        let trail = Trail::longest(&[]);

        assert_eq!(trail.length(), 0);
        assert!(trail.is_empty());
        assert_eq!(trail.station1(), None);
        assert_eq!(trail.station2(), None);
        assert_eq!(trail.to_string(), "(empty trail)");
    }

    #[test]
    fn single_route_prefers_first_direction() {
        let trail = Trail::longest(&[route("BER_FRI_1", BER, FRI, 1)]);

        assert_eq!(trail.length(), 1);
        assert_eq!(trail.station1(), Some(BER));
        assert_eq!(trail.station2(), Some(FRI));
        assert_eq!(trail.to_string(), "Berne - Fribourg (1)");
    }

    #[test]
    fn disconnected_routes_keep_the_longest() {
        let routes = [
            route("BER_FRI_1", BER, FRI, 1),
            route("GEN_YVE_1", GEN, YVE, 6),
            route("NEU_SOL_1", NEU, SOL, 4),
        ];
        let trail = Trail::longest(&routes);

        assert_eq!(trail.length(), 6);
        assert_eq!(trail.to_string(), "Genève - Yverdon (6)");
    }

    #[test]
    fn trail_may_revisit_stations() {
        // A loop through Berne, Fribourg, Lausanne and Neuchâtel, plus a branch to Soleure.
        let routes = [
            route("BER_FRI_1", BER, FRI, 1),
            route("FRI_LAU_1", FRI, LAU, 3),
            route("LAU_NEU_1", LAU, NEU, 4),
            route("BER_NEU_1", BER, NEU, 2),
            route("NEU_SOL_1", NEU, SOL, 4),
        ];
        let trail = Trail::longest(&routes);

        assert_eq!(trail.length(), 14);
        assert_eq!(trail.routes().len(), 5);
        assert_eq!(trail.station1(), Some(NEU));
        assert_eq!(trail.station2(), Some(SOL));
        assert_eq!(
            trail.to_string(),
            "Neuchâtel - Lausanne - Fribourg - Berne - Neuchâtel - Soleure (14)"
        );
    }

    #[test]
    fn parallel_routes_are_not_both_used() {
        let routes = [
            Route::new("BER_FRI_1", BER, FRI, 1, Level::Overground, Some(Color::Orange)).unwrap(),
            Route::new("BER_FRI_2", BER, FRI, 1, Level::Overground, Some(Color::Yellow)).unwrap(),
        ];
        let trail = Trail::longest(&routes);

        assert_eq!(trail.length(), 1);
        assert_eq!(trail.routes(), &routes[..1]);
    }

    #[test]
    fn length_never_decreases_when_adding_connected_routes() {
        let all_routes = [
            route("BER_FRI_1", BER, FRI, 1),
            route("FRI_LAU_1", FRI, LAU, 3),
            route("LAU_NEU_1", LAU, NEU, 4),
            route("NEU_YVE_1", NEU, YVE, 2),
            route("BER_NEU_1", BER, NEU, 2),
            route("GEN_YVE_1", GEN, YVE, 6),
        ];

        let mut previous = 0;
        for count in 0..=all_routes.len() {
            let length = Trail::longest(&all_routes[..count]).length();
            assert!(length >= previous);
            previous = length;
        }
        assert_eq!(previous, 1 + 3 + 4 + 2 + 6 + 2);
    }
}
