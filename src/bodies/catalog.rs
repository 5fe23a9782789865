//! Compiled-in star system catalog
//!
//! Radii are mean radii in km, distances are semi-major distances in AU from
//! the parent, periods are in days.

/// Static description of one body and its moons.
#[derive(Clone, Copy, Debug)]
pub struct BodyDef {
    pub name: &'static str,
    pub info: &'static str,
    pub radius_km: f64,
    pub distance_au: f64,
    pub period_days: f64,
    pub rotation_days: Option<f64>,
    pub color: u32,
    pub has_rings: bool,
    pub moons: &'static [BodyDef],
}

impl BodyDef {
    pub const fn new(
        name: &'static str,
        radius_km: f64,
        distance_au: f64,
        period_days: f64,
        color: u32,
    ) -> Self {
        Self {
            name,
            info: "",
            radius_km,
            distance_au,
            period_days,
            rotation_days: None,
            color,
            has_rings: false,
            moons: &[],
        }
    }

    pub const fn info(self, info: &'static str) -> Self {
        Self { info, ..self }
    }

    pub const fn rotation(self, days: f64) -> Self {
        Self {
            rotation_days: Some(days),
            ..self
        }
    }

    pub const fn rings(self) -> Self {
        Self {
            has_rings: true,
            ..self
        }
    }

    pub const fn moons(self, moons: &'static [BodyDef]) -> Self {
        Self { moons, ..self }
    }
}

pub const SUN: BodyDef = BodyDef::new("Sun", 696_000.0, 0.0, 0.0, 0xffeb3b)
    .info("G-type main-sequence star, 4.6 billion years old.")
    .rotation(25.38)
    .moons(PLANETS);

const PLANETS: &[BodyDef] = &[
    BodyDef::new("Mercury", 2439.0, 0.39, 87.97, 0x9e9e9e)
        .info("Smallest planet, closest to the Sun.")
        .rotation(58.65),
    BodyDef::new("Venus", 6051.0, 0.72, 224.7, 0xffcc80)
        .info("Second planet, hottest due to greenhouse effect.")
        .rotation(243.0),
    BodyDef::new("Earth", 6371.0, 1.0, 365.25, 0x42a5f5)
        .info("Third planet, supports life.")
        .rotation(0.997)
        .moons(EARTH_MOONS),
    BodyDef::new("Mars", 3389.0, 1.52, 686.98, 0xef5350)
        .info("Red planet, Olympus Mons.")
        .rotation(1.026)
        .moons(MARS_MOONS),
    BodyDef::new("Jupiter", 69_911.0, 5.2, 4332.59, 0xd9b38c)
        .info("Largest planet.")
        .rotation(0.414)
        .moons(JUPITER_MOONS),
    BodyDef::new("Saturn", 58_232.0, 9.58, 10_759.22, 0xf5d796)
        .info("Gas giant with rings.")
        .rotation(0.444)
        .rings()
        .moons(SATURN_MOONS),
    BodyDef::new("Uranus", 25_362.0, 19.2, 30_688.5, 0x80deea)
        .info("Ice giant.")
        .rotation(0.718),
    BodyDef::new("Neptune", 24_622.0, 30.1, 59_800.0, 0x42a5f5)
        .info("Farthest planet.")
        .rotation(0.671),
];

// Moon arrays are named so they live in static memory.
const EARTH_MOONS: &[BodyDef] = &[BodyDef::new("Moon", 1737.0, 0.00257, 27.32, 0xbdbdbd)
    .info("Earth's satellite.")
    .rotation(27.32)];

const MARS_MOONS: &[BodyDef] = &[
    BodyDef::new("Phobos", 11.0, 0.000_062_6, 0.32, 0x757575).info("Larger Mars moon."),
    BodyDef::new("Deimos", 6.0, 0.000_157, 1.26, 0x616161).info("Smaller Mars moon."),
];

const JUPITER_MOONS: &[BodyDef] = &[
    BodyDef::new("Io", 1821.0, 0.00282, 1.77, 0xbcaaa4).info("Volcanic moon."),
    BodyDef::new("Europa", 1560.0, 0.00449, 3.55, 0xffccbc).info("Icy moon."),
    BodyDef::new("Ganymede", 2631.0, 0.00714, 7.15, 0xffab91).info("Largest moon."),
    BodyDef::new("Callisto", 2410.0, 0.0126, 16.69, 0xff8a65).info("Cratered moon."),
];

const SATURN_MOONS: &[BodyDef] =
    &[BodyDef::new("Titan", 2575.0, 0.00831, 15.95, 0xfff9c4).info("Moon with atmosphere.")];
