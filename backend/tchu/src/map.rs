//! The static Swiss board: stations, routes and tickets.
//!
//! Both ends of the wire protocol rely on this catalog being identical, as routes and
//! tickets are transmitted by their index in [`ROUTES`] and [`TICKETS`].

use crate::card::Color::{self, *};
use crate::route::{Level, Route};
use crate::station::Station;
use crate::ticket::{Ticket, Trip, Trips};

use smallvec::SmallVec;

pub const STATION_COUNT: usize = 51;

const BAD: Station = Station::new(0, "Baden");
const BAL: Station = Station::new(1, "Bâle");
const BEL: Station = Station::new(2, "Bellinzone");
const BER: Station = Station::new(3, "Berne");
const BRI: Station = Station::new(4, "Brigue");
const BRU: Station = Station::new(5, "Brusio");
const COI: Station = Station::new(6, "Coire");
const DAV: Station = Station::new(7, "Davos");
const DEL: Station = Station::new(8, "Delémont");
const FRI: Station = Station::new(9, "Fribourg");
const GEN: Station = Station::new(10, "Genève");
const INT: Station = Station::new(11, "Interlaken");
const KRE: Station = Station::new(12, "Kreuzlingen");
const LAU: Station = Station::new(13, "Lausanne");
const LCF: Station = Station::new(14, "La Chaux-de-Fonds");
const LOC: Station = Station::new(15, "Locarno");
const LUC: Station = Station::new(16, "Lucerne");
const LUG: Station = Station::new(17, "Lugano");
const MAR: Station = Station::new(18, "Martigny");
const NEU: Station = Station::new(19, "Neuchâtel");
const OLT: Station = Station::new(20, "Olten");
const PFA: Station = Station::new(21, "Pfäffikon");
const SAR: Station = Station::new(22, "Sargans");
const SCE: Station = Station::new(23, "Schaffhouse");
const SCZ: Station = Station::new(24, "Schwyz");
const SIO: Station = Station::new(25, "Sion");
const SOL: Station = Station::new(26, "Soleure");
const STG: Station = Station::new(27, "Saint-Gall");
const VAD: Station = Station::new(28, "Vaduz");
const WAS: Station = Station::new(29, "Wassen");
const WIN: Station = Station::new(30, "Winterthour");
const YVE: Station = Station::new(31, "Yverdon");
const ZOU: Station = Station::new(32, "Zoug");
const ZUR: Station = Station::new(33, "Zürich");

// Entry points of the neighboring countries, all named after their country.
const DE1: Station = Station::new(34, "Allemagne");
const DE2: Station = Station::new(35, "Allemagne");
const DE3: Station = Station::new(36, "Allemagne");
const DE4: Station = Station::new(37, "Allemagne");
const DE5: Station = Station::new(38, "Allemagne");
const AT1: Station = Station::new(39, "Autriche");
const AT2: Station = Station::new(40, "Autriche");
const AT3: Station = Station::new(41, "Autriche");
const IT1: Station = Station::new(42, "Italie");
const IT2: Station = Station::new(43, "Italie");
const IT3: Station = Station::new(44, "Italie");
const IT4: Station = Station::new(45, "Italie");
const IT5: Station = Station::new(46, "Italie");
const FR1: Station = Station::new(47, "France");
const FR2: Station = Station::new(48, "France");
const FR3: Station = Station::new(49, "France");
const FR4: Station = Station::new(50, "France");

const DE: [Station; 5] = [DE1, DE2, DE3, DE4, DE5];
const AT: [Station; 3] = [AT1, AT2, AT3];
const IT: [Station; 5] = [IT1, IT2, IT3, IT4, IT5];
const FR: [Station; 4] = [FR1, FR2, FR3, FR4];

/// Every station of the board, indexed by id.
pub static STATIONS: [Station; STATION_COUNT] = [
    BAD, BAL, BEL, BER, BRI, BRU, COI, DAV, DEL, FRI, GEN, INT, KRE, LAU, LCF, LOC, LUC, LUG,
    MAR, NEU, OLT, PFA, SAR, SCE, SCZ, SIO, SOL, STG, VAD, WAS, WIN, YVE, ZOU, ZUR, DE1, DE2,
    DE3, DE4, DE5, AT1, AT2, AT3, IT1, IT2, IT3, IT4, IT5, FR1, FR2, FR3, FR4,
];

/// Convenience macro to declare a route of the board.
/// An omitted color means that the route accepts cards of any single color.
macro_rules! route {
    (@build $id:literal, $s1:expr, $s2:expr, $length:literal, $level:ident, $color:expr) => {{
        let color: Option<Color> = $color;
        Route::from_board($id, $s1, $s2, $length, Level::$level, color)
    }};
    ($id:literal, $s1:expr, $s2:expr, $length:literal, $level:ident) => {
        route!(@build $id, $s1, $s2, $length, $level, None)
    };
    ($id:literal, $s1:expr, $s2:expr, $length:literal, $level:ident, $color:expr) => {
        route!(@build $id, $s1, $s2, $length, $level, Some($color))
    };
}

/// Convenience macro to declare a ticket from one or more stations to groups of stations.
macro_rules! ticket {
    ($froms:expr => $($tos:expr, $points:literal);+) => {{
        let mut trips: Trips = SmallVec::new();
        $(
            for from in $froms.iter() {
                for to in $tos.iter() {
                    trips.push(Trip::from_board(*from, *to, $points));
                }
            }
        )+
        Ticket::from_trips(trips)
    }};
}

lazy_static! {
    /// Every route of the board, sorted by id.
    pub static ref ROUTES: Vec<Route> = vec![
        route!("AT1_STG_1", AT1, STG, 4, Underground),
        route!("AT2_VAD_1", AT2, VAD, 1, Underground, Red),
        route!("BAD_BAL_1", BAD, BAL, 3, Underground, Red),
        route!("BAD_OLT_1", BAD, OLT, 2, Overground, Violet),
        route!("BAD_ZUR_1", BAD, ZUR, 1, Overground, Yellow),
        route!("BAL_DE1_1", BAL, DE1, 1, Underground, Blue),
        route!("BAL_DEL_1", BAL, DEL, 2, Underground, Yellow),
        route!("BAL_OLT_1", BAL, OLT, 2, Underground, Orange),
        route!("BEL_LOC_1", BEL, LOC, 1, Underground, Black),
        route!("BEL_LUG_1", BEL, LUG, 1, Underground, Red),
        route!("BEL_LUG_2", BEL, LUG, 1, Underground, Yellow),
        route!("BEL_WAS_1", BEL, WAS, 4, Underground),
        route!("BEL_WAS_2", BEL, WAS, 4, Underground),
        route!("BER_FRI_1", BER, FRI, 1, Overground, Orange),
        route!("BER_FRI_2", BER, FRI, 1, Overground, Yellow),
        route!("BER_INT_1", BER, INT, 3, Overground, Blue),
        route!("BER_LUC_1", BER, LUC, 4, Overground),
        route!("BER_LUC_2", BER, LUC, 4, Overground),
        route!("BER_NEU_1", BER, NEU, 2, Overground, Red),
        route!("BER_SOL_1", BER, SOL, 2, Overground, Black),
        route!("BRI_INT_1", BRI, INT, 2, Underground, White),
        route!("BRI_IT5_1", BRI, IT5, 3, Underground, Green),
        route!("BRI_LOC_1", BRI, LOC, 6, Underground),
        route!("BRI_SIO_1", BRI, SIO, 3, Underground, Black),
        route!("BRI_WAS_1", BRI, WAS, 4, Underground, Red),
        route!("BRU_COI_1", BRU, COI, 5, Underground),
        route!("BRU_DAV_1", BRU, DAV, 4, Underground, Blue),
        route!("BRU_IT2_1", BRU, IT2, 2, Underground, Green),
        route!("COI_DAV_1", COI, DAV, 2, Underground, Violet),
        route!("COI_SAR_1", COI, SAR, 1, Underground, White),
        route!("COI_WAS_1", COI, WAS, 5, Underground),
        route!("DAV_AT3_1", DAV, AT3, 3, Underground),
        route!("DAV_IT1_1", DAV, IT1, 3, Underground),
        route!("DAV_SAR_1", DAV, SAR, 3, Underground, Black),
        route!("DE2_SCE_1", DE2, SCE, 1, Overground, Yellow),
        route!("DE3_KRE_1", DE3, KRE, 1, Overground, Orange),
        route!("DE4_KRE_1", DE4, KRE, 1, Overground, White),
        route!("DE5_STG_1", DE5, STG, 2, Overground),
        route!("DEL_FR4_1", DEL, FR4, 2, Underground, Black),
        route!("DEL_LCF_1", DEL, LCF, 3, Underground, White),
        route!("DEL_SOL_1", DEL, SOL, 1, Underground, Violet),
        route!("FR1_MAR_1", FR1, MAR, 2, Underground),
        route!("FR2_GEN_1", FR2, GEN, 1, Overground, Yellow),
        route!("FR3_LCF_1", FR3, LCF, 2, Underground, Green),
        route!("FRI_LAU_1", FRI, LAU, 3, Overground, Red),
        route!("FRI_LAU_2", FRI, LAU, 3, Overground, Violet),
        route!("GEN_LAU_1", GEN, LAU, 4, Overground, Blue),
        route!("GEN_LAU_2", GEN, LAU, 4, Overground, White),
        route!("GEN_YVE_1", GEN, YVE, 6, Overground),
        route!("INT_LUC_1", INT, LUC, 4, Overground, Violet),
        route!("IT3_LUG_1", IT3, LUG, 2, Underground, White),
        route!("IT4_LOC_1", IT4, LOC, 2, Underground, Orange),
        route!("KRE_SCE_1", KRE, SCE, 3, Overground, Violet),
        route!("KRE_STG_1", KRE, STG, 1, Overground, Green),
        route!("KRE_WIN_1", KRE, WIN, 2, Overground, White),
        route!("LAU_MAR_1", LAU, MAR, 4, Underground, Orange),
        route!("LAU_NEU_1", LAU, NEU, 4, Overground),
        route!("LCF_NEU_1", LCF, NEU, 1, Underground, Orange),
        route!("LCF_YVE_1", LCF, YVE, 3, Underground, Yellow),
        route!("LOC_LUG_1", LOC, LUG, 1, Underground, Violet),
        route!("LUC_OLT_1", LUC, OLT, 3, Overground, Green),
        route!("LUC_SCZ_1", LUC, SCZ, 1, Overground, Blue),
        route!("LUC_ZOU_1", LUC, ZOU, 1, Overground, Orange),
        route!("LUC_ZOU_2", LUC, ZOU, 1, Overground, Yellow),
        route!("MAR_SIO_1", MAR, SIO, 2, Underground, Green),
        route!("NEU_SOL_1", NEU, SOL, 4, Overground, Green),
        route!("NEU_YVE_1", NEU, YVE, 2, Overground, Black),
        route!("OLT_SOL_1", OLT, SOL, 1, Overground, Blue),
        route!("OLT_ZUR_1", OLT, ZUR, 3, Overground, White),
        route!("PFA_SAR_1", PFA, SAR, 3, Overground, Yellow),
        route!("PFA_ZUR_1", PFA, ZUR, 2, Overground, Blue),
        route!("SAR_VAD_1", SAR, VAD, 1, Underground, Orange),
        route!("SCE_WIN_1", SCE, WIN, 1, Overground, Black),
        route!("SCE_ZUR_1", SCE, ZUR, 3, Overground, Orange),
        route!("SCZ_WAS_1", SCZ, WAS, 2, Underground, Green),
        route!("SCZ_WAS_2", SCZ, WAS, 2, Underground, Yellow),
        route!("SCZ_ZOU_1", SCZ, ZOU, 1, Overground, Black),
        route!("SCZ_ZOU_2", SCZ, ZOU, 1, Overground, White),
        route!("STG_VAD_1", STG, VAD, 2, Underground, Blue),
        route!("STG_WIN_1", STG, WIN, 4, Overground, Red),
        route!("STG_ZUR_1", STG, ZUR, 4, Overground, Black),
        route!("WIN_ZUR_1", WIN, ZUR, 1, Overground, Blue),
        route!("WIN_ZUR_2", WIN, ZUR, 1, Overground, Violet),
        route!("ZOU_ZUR_1", ZOU, ZUR, 1, Overground, Green),
        route!("ZOU_ZUR_2", ZOU, ZUR, 1, Overground, Red),
    ];

    /// Every ticket of the board.
    pub static ref TICKETS: Vec<Ticket> = vec![
        // City to city.
        ticket!([BAL] => [BER], 5),
        ticket!([BAL] => [BRI], 10),
        ticket!([BAL] => [STG], 8),
        ticket!([BER] => [COI], 10),
        ticket!([BER] => [LUG], 12),
        ticket!([BER] => [SCZ], 5),
        ticket!([BER] => [ZUR], 6),
        ticket!([FRI] => [LUC], 5),
        ticket!([GEN] => [BAL], 13),
        ticket!([GEN] => [BER], 8),
        ticket!([GEN] => [SIO], 10),
        ticket!([GEN] => [ZUR], 14),
        ticket!([INT] => [WIN], 7),
        ticket!([KRE] => [SCZ], 5),
        ticket!([LCF] => [LUC], 7),
        ticket!([LAU] => [COI], 13),
        ticket!([LAU] => [STG], 13),
        ticket!([LCF] => [ZUR], 8),
        ticket!([LUC] => [BRU], 9),
        ticket!([LUC] => [LOC], 7),
        ticket!([MAR] => [DEL], 8),
        ticket!([NEU] => [WIN], 9),
        ticket!([OLT] => [VAD], 9),
        ticket!([SCE] => [LOC], 10),
        ticket!([SIO] => [LUG], 9),
        ticket!([SOL] => [ZOU], 5),
        ticket!([STG] => [BEL], 10),
        ticket!([YVE] => [LOC], 13),
        ticket!([ZUR] => [BRI], 11),
        ticket!([ZUR] => [LUG], 9),
        ticket!([ZUR] => [VAD], 6),
        // City to neighboring countries.
        ticket!([BER] => DE, 6; AT, 11; IT, 8; FR, 5),
        ticket!([ZUR] => DE, 3; AT, 6; IT, 11; FR, 8),
        // Country to country.
        ticket!(DE => AT, 5; IT, 13; FR, 5),
        ticket!(AT => DE, 5; IT, 13; FR, 14),
        ticket!(IT => DE, 13; AT, 13; FR, 11),
        ticket!(FR => DE, 5; AT, 14; IT, 11),
    ];
}
