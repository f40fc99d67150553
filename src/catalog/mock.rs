//! # Generated sky
//!
//! [`MockCatalog`] produces a plausible, fully offline sky: the Sun, the Moon, the seven
//! other planets with their colour tags, thirty named bright stars at their real
//! positions, and randomly placed filler populations covering the whole sphere.
//!
//! | population   | count | magnitude | declination                 |
//! |--------------|-------|-----------|-----------------------------|
//! | medium       | 100   | 2.0 – 3.0 | weighted toward the equator |
//! | faint        | 200   | 3.0 – 4.5 | weighted toward the equator |
//! | very faint   | 500   | 4.5 – 6.0 | weighted toward the equator |
//! | north polar  | 30    | 4.0 – 6.0 | 60 – 90                     |
//! | south polar  | 30    | 4.0 – 6.0 | −90 – −60                   |
//! | equatorial   | 100   | 3.5 – 6.0 | −30 – 30                    |
//! | southern     | 50    | 4.0 – 6.0 | −60 – −30                   |
//! | northern     | 50    | 4.0 – 6.0 | 30 – 60                     |
//!
//! The generator is seeded ([`StdRng::seed_from_u64`]), so a given seed always yields the
//! same sky.
use std::ops::Range;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::catalog::CatalogProvider;
use crate::celestial::{CelestialObject, ObjectKind, ObjectType};
use crate::skymap_errors::SkyMapError;

/// Default generator seed
pub const DEFAULT_MOCK_SEED: u64 = 42;

const SPECTRAL_CLASSES: [&str; 7] = ["O", "B", "A", "F", "G", "K", "M"];

/// `(id, name, type, magnitude, ra, dec, colour)`
const SOLAR_SYSTEM: [(&str, &str, ObjectType, f64, f64, f64, &str); 9] = [
    ("sun", "Sun", ObjectType::Sun, -26.7, 180.0, 0.0, "#FFFF00"),
    ("moon", "Moon", ObjectType::Moon, -12.6, 190.0, 10.0, "#C0C0C0"),
    ("mercury", "Mercury", ObjectType::Planet, -0.4, 200.0, 5.0, "#8C7853"),
    ("venus", "Venus", ObjectType::Planet, -4.1, 210.0, -10.0, "#FFC649"),
    ("mars", "Mars", ObjectType::Planet, -2.6, 220.0, 15.0, "#CD5C5C"),
    ("jupiter", "Jupiter", ObjectType::Planet, -2.2, 230.0, -5.0, "#D8CA9D"),
    ("saturn", "Saturn", ObjectType::Planet, 0.5, 240.0, 20.0, "#FAD5A5"),
    ("uranus", "Uranus", ObjectType::Planet, 5.7, 250.0, -15.0, "#4FD0E7"),
    ("neptune", "Neptune", ObjectType::Planet, 7.8, 260.0, 25.0, "#4B70DD"),
];

/// `(name, magnitude, ra, dec, spectral class)`
const BRIGHT_STARS: [(&str, f64, f64, f64, &str); 30] = [
    ("Sirius", -1.46, 101.287, -16.716, "A"),
    ("Canopus", -0.74, 95.988, -52.696, "A"),
    ("Arcturus", -0.05, 213.915, 19.182, "K"),
    ("Vega", 0.03, 279.234, 38.784, "A"),
    ("Capella", 0.08, 79.172, 45.998, "G"),
    ("Rigel", 0.13, 78.634, -8.202, "B"),
    ("Procyon", 0.34, 114.825, 5.225, "F"),
    ("Betelgeuse", 0.50, 88.793, 7.407, "M"),
    ("Achernar", 0.46, 24.429, -57.237, "B"),
    ("Hadar", 0.61, 210.956, -60.373, "B"),
    ("Altair", 0.77, 297.696, 8.868, "A"),
    ("Aldebaran", 0.85, 68.980, 16.509, "K"),
    ("Antares", 1.09, 247.352, -26.432, "M"),
    ("Spica", 1.04, 201.298, -11.161, "B"),
    ("Pollux", 1.14, 116.329, 28.026, "K"),
    ("Fomalhaut", 1.16, 344.413, -29.622, "A"),
    ("Deneb", 1.25, 310.358, 45.280, "A"),
    ("Regulus", 1.35, 152.093, 11.967, "B"),
    ("Adhara", 1.50, 104.656, -28.972, "B"),
    ("Castor", 1.57, 113.650, 31.888, "A"),
    ("Gacrux", 1.63, 187.791, -57.113, "M"),
    ("Bellatrix", 1.64, 81.283, 6.350, "B"),
    ("Elnath", 1.68, 81.573, 28.608, "B"),
    ("Miaplacidus", 1.68, 138.300, -69.717, "A"),
    ("Alnilam", 1.69, 84.053, -1.202, "B"),
    ("Regor", 1.75, 125.628, -47.336, "O"),
    ("Alnair", 1.74, 332.058, -46.961, "B"),
    ("Alioth", 1.77, 193.507, 55.960, "A"),
    ("Alnitak", 1.79, 85.190, -1.943, "O"),
    ("Dubhe", 1.79, 165.932, 61.751, "K"),
];

const MEDIUM_STAR_NAMES: [&str; 40] = [
    "Mirfak", "Algol", "Almach", "Hamal", "Sheratan", "Mesarthim", "Menkar", "Zaurak",
    "Acamar", "Cursa", "Menkent", "Muhlifain", "Aspidiske", "Suhail", "Markeb", "Avior",
    "Naos", "Aludra", "Wezen", "Furud", "Mirzam", "Arneb", "Nihal", "Mintaka", "Hatsya",
    "Meissa", "Mirach", "Alpheratz", "Caph", "Schedar", "Ruchbah", "Kornephoros", "Porrima",
    "Vindemiatrix", "Zavijava", "Seginus", "Nekkar", "Izar", "Muphrid", "Alkalurops",
];

const FAINT_CATALOG_PREFIXES: [&str; 10] = [
    "HD", "SAO", "HIP", "TYC", "GSC", "PPM", "HR", "BD", "CD", "ADS",
];

/// Seeded generator of a complete mock sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockCatalog {
    seed: u64,
}

impl Default for MockCatalog {
    fn default() -> Self {
        MockCatalog::new(DEFAULT_MOCK_SEED)
    }
}

impl CatalogProvider for MockCatalog {
    async fn load_objects(&self) -> Result<Vec<CelestialObject>, SkyMapError> {
        self.generate()
    }
}

impl MockCatalog {
    pub fn new(seed: u64) -> Self {
        MockCatalog { seed }
    }

    /// Build the whole object list synchronously.
    pub fn generate(&self) -> Result<Vec<CelestialObject>, SkyMapError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut objects = Vec::with_capacity(1_100);

        for (id, name, object_type, magnitude, ra, dec, color) in SOLAR_SYSTEM {
            let object = CelestialObject::new(
                id,
                name,
                magnitude,
                ra,
                dec,
                ObjectKind::default_for(object_type),
            )?;
            objects.push(object.with_tag(color));
        }

        for (name, magnitude, ra, dec, class) in BRIGHT_STARS {
            let id = name.to_lowercase();
            objects.push(CelestialObject::star(id, name, magnitude, ra, dec)?.with_tag(class));
        }

        for i in 0..100 {
            let name = MEDIUM_STAR_NAMES[i % MEDIUM_STAR_NAMES.len()];
            let dec = weighted_declination(&mut rng);
            objects.push(random_star(&mut rng, format!("medium_star_{i}"), name, 2.0..3.0, dec, i)?);
        }

        for i in 0..200 {
            let prefix = FAINT_CATALOG_PREFIXES[i % FAINT_CATALOG_PREFIXES.len()];
            let name = format!("{prefix}{}", i / FAINT_CATALOG_PREFIXES.len() + 1);
            let dec = weighted_declination(&mut rng);
            objects.push(random_star(&mut rng, format!("faint_star_{i}"), &name, 3.0..4.5, dec, i)?);
        }

        for i in 0..500 {
            let name = format!("Star_{}", i + 1000);
            let dec = weighted_declination(&mut rng);
            objects.push(random_star(
                &mut rng,
                format!("very_faint_star_{i}"),
                &name,
                4.5..6.0,
                dec,
                i,
            )?);
        }

        let regions: [(&str, &str, usize, Range<f64>, Range<f64>); 5] = [
            ("north_polar", "NorthPolar", 30, 4.0..6.0, 60.0..90.0),
            ("south_polar", "SouthPolar", 30, 4.0..6.0, -90.0..-60.0),
            ("equatorial", "Equatorial", 100, 3.5..6.0, -30.0..30.0),
            ("southern", "Southern", 50, 4.0..6.0, -60.0..-30.0),
            ("northern", "Northern", 50, 4.0..6.0, 30.0..60.0),
        ];
        for (id_prefix, name_prefix, count, magnitudes, declinations) in regions {
            for i in 0..count {
                let dec = rng.random_range(declinations.clone());
                objects.push(random_star(
                    &mut rng,
                    format!("{id_prefix}_{i}"),
                    &format!("{name_prefix}_{i}"),
                    magnitudes.clone(),
                    dec,
                    i,
                )?);
            }
        }

        Ok(objects)
    }
}

fn random_star(
    rng: &mut StdRng,
    id: String,
    name: &str,
    magnitudes: Range<f64>,
    dec: f64,
    index: usize,
) -> Result<CelestialObject, SkyMapError> {
    let magnitude = rng.random_range(magnitudes);
    let ra = rng.random_range(0.0..360.0);
    let class = SPECTRAL_CLASSES[index % SPECTRAL_CLASSES.len()];
    Ok(CelestialObject::star(id, name, magnitude, ra, dec)?.with_tag(class))
}

/// 40 % within ±30°, 30 % in the mid bands, 30 % in the polar caps.
fn weighted_declination(rng: &mut StdRng) -> f64 {
    let band: f64 = rng.random();
    let north = rng.random_bool(0.5);
    if band < 0.4 {
        rng.random_range(-30.0..30.0)
    } else if band < 0.7 {
        let dec = rng.random_range(30.0..60.0);
        if north {
            dec
        } else {
            -dec
        }
    } else {
        let dec = rng.random_range(60.0..90.0);
        if north {
            dec
        } else {
            -dec
        }
    }
}
