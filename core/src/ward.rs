//! Static ward reference table.
//!
//! RULE: Ward profiles are defined once at process start and never mutated.
//! Everything else in the engine borrows them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse geographic grouping of wards sharing elevation and drainage traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Central,
    East,
    West,
    North,
    #[serde(rename = "North West")]
    NorthWest,
    South,
    #[serde(rename = "South West")]
    SouthWest,
    #[serde(rename = "South East")]
    SouthEast,
}

impl Zone {
    pub const ALL: [Zone; 8] = [
        Zone::Central,
        Zone::East,
        Zone::West,
        Zone::North,
        Zone::NorthWest,
        Zone::South,
        Zone::SouthWest,
        Zone::SouthEast,
    ];

    /// Inverse of [`Zone::as_str`].
    pub fn from_name(name: &str) -> Option<Zone> {
        Self::ALL.into_iter().find(|z| z.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Central   => "Central",
            Self::East      => "East",
            Self::West      => "West",
            Self::North     => "North",
            Self::NorthWest => "North West",
            Self::South     => "South",
            Self::SouthWest => "South West",
            Self::SouthEast => "South East",
        }
    }

    /// Ground elevation band (m above sea level) sampled for wards in this zone.
    /// East sits on the river flood plain; South is the ridge.
    pub fn elevation_range(&self) -> (f64, f64) {
        match self {
            Self::South   => (220.0, 230.0),
            Self::East    => (205.0, 212.0),
            Self::Central => (214.0, 222.0),
            _             => (215.0, 225.0),
        }
    }

    /// Midpoint of the elevation band, used as a serving-time default.
    pub fn typical_elevation(&self) -> f64 {
        let (lo, hi) = self.elevation_range();
        (lo + hi) / 2.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One administrative ward and its geographic anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WardProfile {
    pub name:                &'static str,
    pub zone:                Zone,
    pub latitude:            f64,
    pub longitude:           f64,
    /// Base distance to the Yamuna, in metres.
    pub distance_to_river_m: f64,
}

const fn ward(
    name: &'static str,
    zone: Zone,
    latitude: f64,
    longitude: f64,
    distance_to_river_m: f64,
) -> WardProfile {
    WardProfile { name, zone, latitude, longitude, distance_to_river_m }
}

/// Lookup table over the ward profiles known to this process.
#[derive(Debug, Clone)]
pub struct WardRegistry {
    wards: Vec<WardProfile>,
}

impl WardRegistry {
    /// The full Delhi ward table.
    pub fn delhi() -> Self {
        Self { wards: DELHI_WARDS.to_vec() }
    }

    /// A registry over an explicit set of profiles. Used by tests and
    /// by callers that only want to generate over a subset of wards.
    pub fn from_profiles(wards: Vec<WardProfile>) -> Self {
        Self { wards }
    }

    pub fn get(&self, name: &str) -> Option<&WardProfile> {
        self.wards.iter().find(|w| w.name == name)
    }

    pub fn wards(&self) -> &[WardProfile] {
        &self.wards
    }

    pub fn len(&self) -> usize {
        self.wards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wards.is_empty()
    }

    pub fn in_zone(&self, zone: Zone) -> impl Iterator<Item = &WardProfile> {
        self.wards.iter().filter(move |w| w.zone == zone)
    }
}

impl Default for WardRegistry {
    fn default() -> Self {
        Self::delhi()
    }
}

static DELHI_WARDS: &[WardProfile] = &[
    // ── Central ──
    ward("Karol Bagh", Zone::Central, 28.6514, 77.1907, 3500.0),
    ward("Connaught Place", Zone::Central, 28.6315, 77.2167, 3200.0),
    ward("Paharganj", Zone::Central, 28.6453, 77.2128, 2800.0),
    ward("Old Delhi", Zone::Central, 28.6145, 77.1876, 3300.0),
    ward("Chandni Chowk", Zone::Central, 28.6557, 77.2309, 3000.0),
    ward("Daryaganj", Zone::Central, 28.6393, 77.2417, 3100.0),
    ward("Jama Masjid", Zone::Central, 28.6507, 77.2337, 2900.0),
    ward("Sadar Bazaar", Zone::Central, 28.6692, 77.2128, 3600.0),
    ward("Tis Hazari", Zone::Central, 28.6728, 77.2179, 3800.0),
    ward("Kashmere Gate", Zone::Central, 28.6798, 77.2076, 3100.0),
    ward("Nabi Karim", Zone::Central, 28.6589, 77.2245, 3200.0),
    ward("Ballimaran", Zone::Central, 28.6534, 77.2189, 3050.0),
    // ── East ──
    ward("Mayur Vihar Phase 1", Zone::East, 28.6083, 77.2908, 1500.0),
    ward("Mayur Vihar Phase 2", Zone::East, 28.6056, 77.2956, 1600.0),
    ward("Mayur Vihar Phase 3", Zone::East, 28.6023, 77.3012, 1700.0),
    ward("Patparganj", Zone::East, 28.5789, 77.2712, 2200.0),
    ward("Seelampur", Zone::East, 28.6489, 77.2478, 2600.0),
    ward("Shahdara", Zone::East, 28.6718, 77.2871, 1800.0),
    ward("Gandhi Nagar", Zone::East, 28.6565, 77.2765, 2400.0),
    ward("Preet Vihar", Zone::East, 28.6253, 77.3056, 2000.0),
    ward("Geeta Colony", Zone::East, 28.6678, 77.2723, 2700.0),
    ward("Vivek Vihar", Zone::East, 28.6432, 77.2956, 1900.0),
    ward("Yamuna Vihar", Zone::East, 28.6776, 77.2845, 1600.0),
    ward("Laxmi Nagar", Zone::East, 28.6215, 77.2754, 2500.0),
    ward("Anand Vihar", Zone::East, 28.6456, 77.3132, 1400.0),
    ward("Krishna Nagar", Zone::East, 28.6345, 77.2891, 2300.0),
    ward("Nirman Vihar", Zone::East, 28.6167, 77.2812, 2100.0),
    ward("Karkardooma", Zone::East, 28.6289, 77.2945, 2000.0),
    ward("Dilshad Garden", Zone::East, 28.6623, 77.3245, 1100.0),
    ward("IP Extension", Zone::East, 28.6198, 77.2989, 1900.0),
    ward("Shakarpur", Zone::East, 28.6545, 77.2789, 2600.0),
    ward("Mansarovar Park", Zone::East, 28.6723, 77.2912, 1750.0),
    ward("Seemapuri", Zone::East, 28.6856, 77.3023, 1200.0),
    // ── South ──
    ward("Vasant Kunj", Zone::South, 28.5245, 77.1492, 10500.0),
    ward("Saket", Zone::South, 28.5576, 77.1789, 5500.0),
    ward("Malviya Nagar", Zone::South, 28.5623, 77.1567, 5400.0),
    ward("Green Park", Zone::South, 28.5432, 77.1923, 5800.0),
    ward("Safdarjung Enclave", Zone::South, 28.5678, 77.2034, 5200.0),
    ward("Greater Kailash Part 1", Zone::South, 28.5667, 77.2156, 5300.0),
    ward("Greater Kailash Part 2", Zone::South, 28.5612, 77.2234, 5400.0),
    ward("Vasant Vihar", Zone::South, 28.4867, 77.1324, 9800.0),
    ward("Lodhi Colony", Zone::South, 28.5812, 77.2212, 5100.0),
    ward("Nehru Place", Zone::South, 28.5489, 77.2189, 5600.0),
    ward("Kalkaji", Zone::South, 28.5376, 77.2523, 4800.0),
    ward("Govindpuri", Zone::South, 28.5298, 77.2634, 4700.0),
    ward("Jasola", Zone::South, 28.5432, 77.2891, 4200.0),
    ward("Sarita Vihar", Zone::South, 28.5212, 77.2745, 4500.0),
    ward("Mehrauli", Zone::South, 28.5234, 77.1845, 6200.0),
    ward("Tuglakabad", Zone::South, 28.5123, 77.2634, 4400.0),
    ward("Sangam Vihar", Zone::South, 28.5089, 77.2456, 4600.0),
    ward("Deoli", Zone::South, 28.5156, 77.2312, 5000.0),
    ward("Ambedkar Nagar", Zone::South, 28.5223, 77.2189, 5200.0),
    ward("Chittaranjan Park", Zone::South, 28.5345, 77.2356, 4900.0),
    ward("Alaknanda", Zone::South, 28.5412, 77.2212, 5100.0),
    ward("Saket Block A", Zone::South, 28.5598, 77.1823, 5600.0),
    ward("Saket Block B", Zone::South, 28.5576, 77.1789, 5500.0),
    ward("Saket Block C", Zone::South, 28.5554, 77.1756, 5450.0),
    ward("South Extension Part 1", Zone::South, 28.5898, 77.2112, 4800.0),
    ward("South Extension Part 2", Zone::South, 28.5876, 77.1989, 5100.0),
    // ── West ──
    ward("Rajouri Garden", Zone::West, 28.6334, 77.0912, 6200.0),
    ward("Paschim Vihar", Zone::West, 28.6734, 77.1478, 6800.0),
    ward("Janakpuri", Zone::West, 28.5918, 77.0892, 6500.0),
    ward("Patel Nagar", Zone::West, 28.6345, 77.1612, 6000.0),
    ward("Rajendra Place", Zone::West, 28.6289, 77.1734, 5900.0),
    ward("Kirti Nagar", Zone::West, 28.6412, 77.1545, 6100.0),
    ward("Moti Nagar", Zone::West, 28.6523, 77.1467, 6300.0),
    ward("Tagore Garden", Zone::West, 28.6189, 77.0823, 6600.0),
    ward("Vikaspuri", Zone::West, 28.5923, 77.0734, 7000.0),
    ward("Uttam Nagar", Zone::West, 28.6123, 77.0523, 7200.0),
    ward("Bindapur", Zone::West, 28.6034, 77.0645, 7100.0),
    ward("Najafgarh", Zone::West, 28.6123, 77.0356, 8000.0),
    ward("Palam", Zone::West, 28.5678, 77.1023, 7500.0),
    ward("Mahipalpur", Zone::West, 28.5545, 77.1234, 7300.0),
    ward("Munirka", Zone::West, 28.5423, 77.1456, 6900.0),
    ward("Subhash Nagar", Zone::West, 28.6298, 77.1523, 6400.0),
    ward("Karampura", Zone::West, 28.6376, 77.1489, 6200.0),
    ward("Ramesh Nagar", Zone::West, 28.6312, 77.1423, 6300.0),
    ward("Tilak Nagar", Zone::West, 28.6156, 77.0923, 6800.0),
    ward("Janakpuri A Block", Zone::West, 28.5934, 77.0912, 6550.0),
    ward("Janakpuri B Block", Zone::West, 28.5918, 77.0892, 6500.0),
    ward("Janakpuri C Block", Zone::West, 28.5902, 77.0876, 6450.0),
    ward("Rajouri Garden Extension", Zone::West, 28.6356, 77.0934, 6250.0),
    ward("Raja Garden", Zone::West, 28.6445, 77.1212, 6050.0),
    ward("Mayapuri", Zone::West, 28.6234, 77.1123, 6400.0),
    ward("Naraina", Zone::West, 28.6345, 77.1345, 6100.0),
    ward("Kirti Nagar Extension", Zone::West, 28.6434, 77.1589, 6150.0),
    ward("Paschim Puri", Zone::West, 28.6756, 77.1512, 6900.0),
    ward("Punjabi Bagh", Zone::West, 28.6645, 77.1389, 6500.0),
    ward("Shadipur", Zone::West, 28.6456, 77.1298, 6300.0),
    // ── North ──
    ward("Model Town", Zone::North, 28.6892, 77.2124, 5800.0),
    ward("Civil Lines", Zone::North, 28.6623, 77.2298, 4500.0),
    ward("Burari", Zone::North, 28.7312, 77.2123, 5600.0),
    ward("Kamla Nagar", Zone::North, 28.6734, 77.2212, 4200.0),
    ward("Timarpur", Zone::North, 28.6845, 77.2034, 4800.0),
    ward("Kingsway Camp", Zone::North, 28.6756, 77.1923, 5000.0),
    ward("Azadpur", Zone::North, 28.7123, 77.1812, 5200.0),
    ward("Wazirabad", Zone::North, 28.7234, 77.2345, 3800.0),
    ward("Badli", Zone::North, 28.7345, 77.1634, 6000.0),
    ward("Rohini Sector 1", Zone::North, 28.7512, 77.0823, 7400.0),
    ward("Rohini Sector 2", Zone::North, 28.7489, 77.0789, 7300.0),
    ward("Rohini Sector 4", Zone::North, 28.7467, 77.0756, 7200.0),
    ward("Rohini Sector 7", Zone::North, 28.7445, 77.0723, 7100.0),
    ward("Rohini Sector 8", Zone::North, 28.7495, 77.0565, 7200.0),
    ward("Rohini Sector 9", Zone::North, 28.7523, 77.0512, 7300.0),
    ward("Adarsh Nagar", Zone::North, 28.7012, 77.1923, 5200.0),
    ward("Malka Ganj", Zone::North, 28.6945, 77.2034, 5000.0),
    ward("Roshanara Road", Zone::North, 28.6876, 77.2145, 4800.0),
    ward("Bara Hindu Rao", Zone::North, 28.6789, 77.2256, 4600.0),
    ward("Subzi Mandi", Zone::North, 28.6823, 77.2189, 4700.0),
    // ── North West ──
    ward("Pitampura", Zone::NorthWest, 28.6987, 77.1687, 5900.0),
    ward("Ashok Vihar", Zone::NorthWest, 28.7215, 77.1456, 6100.0),
    ward("Shalimar Bagh", Zone::NorthWest, 28.7098, 77.1025, 6400.0),
    ward("Rohini Sector 3", Zone::NorthWest, 28.7567, 77.0823, 7800.0),
    ward("Rohini Sector 5", Zone::NorthWest, 28.7634, 77.0912, 8000.0),
    ward("Rohini Sector 15", Zone::NorthWest, 28.7545, 77.0634, 8200.0),
    ward("Rohini Sector 16", Zone::NorthWest, 28.7512, 77.0456, 8700.0),
    ward("Rohini Sector 22", Zone::NorthWest, 28.7467, 77.0245, 9000.0),
    ward("Rohini Sector 24", Zone::NorthWest, 28.7423, 77.0123, 9200.0),
    ward("Bawana", Zone::NorthWest, 28.7812, 77.0356, 9500.0),
    ward("Narela", Zone::NorthWest, 28.7923, 77.0245, 11000.0),
    ward("Sultanpur", Zone::NorthWest, 28.7123, 77.1123, 6500.0),
    ward("Rithala", Zone::NorthWest, 28.7345, 77.0734, 8500.0),
    ward("Pehladpur", Zone::NorthWest, 28.6987, 77.0812, 7000.0),
    ward("Nangloi", Zone::NorthWest, 28.6789, 77.0634, 8800.0),
    ward("Hari Nagar", Zone::NorthWest, 28.6434, 77.0923, 7200.0),
    ward("Raj Park", Zone::NorthWest, 28.6723, 77.1089, 6800.0),
    ward("Saraswati Vihar", Zone::NorthWest, 28.7123, 77.1345, 6200.0),
    ward("Wazirpur", Zone::NorthWest, 28.6956, 77.1512, 6000.0),
    ward("Rohini Sector 11", Zone::NorthWest, 28.7589, 77.0689, 8300.0),
    ward("Rohini Sector 12", Zone::NorthWest, 28.7612, 77.0645, 8400.0),
    ward("Rohini Sector 13", Zone::NorthWest, 28.7634, 77.0601, 8500.0),
    ward("Rohini Sector 14", Zone::NorthWest, 28.7523, 77.0589, 8600.0),
    ward("Rohini Sector 17", Zone::NorthWest, 28.7489, 77.0434, 8800.0),
    ward("Rohini Sector 18", Zone::NorthWest, 28.7456, 77.0389, 8900.0),
    ward("Rohini Sector 19", Zone::NorthWest, 28.7423, 77.0345, 9000.0),
    ward("Rohini Sector 20", Zone::NorthWest, 28.7398, 77.0301, 9100.0),
    ward("Rohini Sector 21", Zone::NorthWest, 28.7376, 77.0256, 9200.0),
    ward("Rohini Sector 23", Zone::NorthWest, 28.7401, 77.0189, 9300.0),
    ward("Rohini Sector 25", Zone::NorthWest, 28.7434, 77.0156, 9400.0),
    ward("Mangolpuri", Zone::NorthWest, 28.7234, 77.0989, 7800.0),
    ward("Sultanpuri", Zone::NorthWest, 28.7145, 77.0823, 8200.0),
    ward("Kirari", Zone::NorthWest, 28.7023, 77.0756, 8400.0),
    ward("Kanjhawala", Zone::NorthWest, 28.6898, 77.0689, 8600.0),
    ward("Bijwasan", Zone::NorthWest, 28.5312, 77.1156, 9200.0),
    // ── South West ──
    ward("Dwarka Sector 1", Zone::SouthWest, 28.5789, 77.0912, 8700.0),
    ward("Dwarka Sector 2", Zone::SouthWest, 28.5767, 77.0878, 8800.0),
    ward("Dwarka Sector 3", Zone::SouthWest, 28.5745, 77.0845, 8900.0),
    ward("Dwarka Sector 4", Zone::SouthWest, 28.5723, 77.0812, 9000.0),
    ward("Dwarka Sector 5", Zone::SouthWest, 28.5701, 77.0778, 9100.0),
    ward("Dwarka Sector 6", Zone::SouthWest, 28.5634, 77.0734, 8800.0),
    ward("Dwarka Sector 7", Zone::SouthWest, 28.5612, 77.0701, 8900.0),
    ward("Dwarka Sector 8", Zone::SouthWest, 28.5598, 77.0667, 9000.0),
    ward("Dwarka Sector 9", Zone::SouthWest, 28.5576, 77.0634, 9100.0),
    ward("Dwarka Sector 10", Zone::SouthWest, 28.5545, 77.0912, 9000.0),
    ward("Dwarka Sector 11", Zone::SouthWest, 28.5523, 77.0589, 9200.0),
    ward("Dwarka Sector 12", Zone::SouthWest, 28.5501, 77.0556, 9300.0),
    ward("Dwarka Sector 13", Zone::SouthWest, 28.5478, 77.0523, 9400.0),
    ward("Dwarka Sector 14", Zone::SouthWest, 28.5456, 77.0823, 9200.0),
    ward("Dwarka Sector 21", Zone::SouthWest, 28.5822, 77.0500, 8500.0),
    ward("Dwarka Sector 22", Zone::SouthWest, 28.5367, 77.0456, 9500.0),
    ward("Dwarka Sector 23", Zone::SouthWest, 28.5345, 77.0423, 9600.0),
    ward("Dwarka Sector 24", Zone::SouthWest, 28.5323, 77.0389, 9700.0),
    ward("Dwarka Sector 25", Zone::SouthWest, 28.5301, 77.0356, 9800.0),
    ward("Kapashera", Zone::SouthWest, 28.5234, 77.1023, 9800.0),
    ward("Dabri", Zone::SouthWest, 28.6123, 77.1023, 8200.0),
    ward("Mahavir Enclave", Zone::SouthWest, 28.6012, 77.0912, 8400.0),
    ward("Dashrath Puri", Zone::SouthWest, 28.5891, 77.0812, 8600.0),
    ward("Chhawla", Zone::SouthWest, 28.5767, 77.0634, 8900.0),
    ward("Najafgarh Extension", Zone::SouthWest, 28.6123, 77.0356, 8100.0),
    // ── South East ──
    ward("Lajpat Nagar", Zone::SouthEast, 28.5677, 77.2433, 4200.0),
    ward("Okhla Phase 1", Zone::SouthEast, 28.5355, 77.2656, 3800.0),
    ward("Okhla Phase 2", Zone::SouthEast, 28.5334, 77.2689, 3900.0),
    ward("Okhla Phase 3", Zone::SouthEast, 28.5312, 77.2723, 4000.0),
    ward("Defence Colony", Zone::SouthEast, 28.5543, 77.2345, 4100.0),
    ward("Hauz Khas", Zone::SouthEast, 28.5434, 77.2056, 4800.0),
    ward("Jangpura", Zone::SouthEast, 28.5978, 77.2245, 3900.0),
    ward("New Friends Colony", Zone::SouthEast, 28.5456, 77.2789, 4000.0),
    ward("Jasola Vihar", Zone::SouthEast, 28.5323, 77.2891, 4300.0),
    ward("Shaheen Bagh", Zone::SouthEast, 28.5234, 77.3012, 4100.0),
    ward("Kalindi Kunj", Zone::SouthEast, 28.5345, 77.3123, 3900.0),
    ward("Abul Fazal Enclave", Zone::SouthEast, 28.5212, 77.3234, 4200.0),
    ward("Batla House", Zone::SouthEast, 28.5289, 77.3189, 4150.0),
    ward("Zakir Nagar", Zone::SouthEast, 28.5312, 77.3145, 4100.0),
    ward("Johori Farm", Zone::SouthEast, 28.5245, 77.3089, 4050.0),
    ward("Jamia Nagar", Zone::SouthEast, 28.5467, 77.2956, 4400.0),
    ward("Okhla Industrial Area", Zone::SouthEast, 28.5389, 77.2823, 4000.0),
    ward("Madanpur Khadar", Zone::SouthEast, 28.5156, 77.2912, 4500.0),
    ward("Noonka", Zone::SouthEast, 28.5123, 77.2989, 4600.0),
    ward("Haji Colony", Zone::SouthEast, 28.5089, 77.3045, 4700.0),
];
