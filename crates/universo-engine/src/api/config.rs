use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of planets in the scene. Fixed for the lifetime of a session.
pub const BODY_COUNT: usize = 7;

/// Describes one planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    /// Label shown in the tooltip.
    pub name: String,
    /// Sphere radius in scene units (before device scaling).
    pub size: f32,
    /// Angular speed on the desktop orbit, radians per frame.
    pub base_speed: f32,
    /// Desktop orbit radius in scene units (before device scaling).
    pub orbit_radius: f32,
    /// Starting angle on the desktop orbit, radians.
    #[serde(default)]
    pub initial_angle: f32,
    /// Whether the planet wears a ring.
    #[serde(default)]
    pub ring: bool,
    /// Relative path to the surface texture.
    #[serde(default)]
    pub texture: String,
}

/// Session configuration. Loaded from JSON by the host or built from defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// The seven planets, in panel order.
    #[serde(default = "default_planets")]
    pub planets: Vec<PlanetSpec>,
    /// Relative path to the central logo model.
    #[serde(default = "default_model_url")]
    pub model_url: String,
    /// Whether hover/touch tooltips are shown.
    #[serde(default = "default_tooltips")]
    pub tooltips: bool,
    /// Stars in the loading tunnel (lower on weak devices).
    #[serde(default = "default_tunnel_stars")]
    pub tunnel_stars: usize,
    /// Seed for jitter, queue shuffles and tunnel stars.
    #[serde(default)]
    pub seed: u64,
}

fn default_model_url() -> String {
    "IMGS/Trestech.gltf".to_string()
}

fn default_tooltips() -> bool {
    true
}

fn default_tunnel_stars() -> usize {
    2000
}

fn default_planets() -> Vec<PlanetSpec> {
    use std::f32::consts::TAU;

    // The first five get fixed size variations; the last two use their average.
    const VARIATIONS: [f32; 5] = [0.1, 0.3, 0.2, 0.4, 0.5];
    const SHRINK: [f32; 5] = [0.9, 0.75, 0.85, 0.95, 1.0];
    // Desktop speeds run at 70% of the base ramp.
    const SPEED_FACTOR: f32 = 0.7;

    let names = [
        "Chamados",
        "Segurança",
        "Boas Praticas",
        "Equipamentos",
        "Acesso ao Escritório",
        "Novidades",
        "Biblioteca de Recursos",
    ];
    let textures = [
        "IMGS/planet1.webp",
        "IMGS/planet2.webp",
        "IMGS/planet3.webp",
        "IMGS/planet4.webp",
        "IMGS/planet5.webp",
        "IMGS/planet7.webp",
        "IMGS/planet6.webp",
    ];

    let mut planets = Vec::with_capacity(BODY_COUNT);
    for i in 0..5 {
        planets.push(PlanetSpec {
            name: names[i].to_string(),
            size: (0.45 + VARIATIONS[i]) * SHRINK[i],
            base_speed: (0.001 + i as f32 * 0.0008) * SPEED_FACTOR,
            orbit_radius: (7.0 + i as f32 * 1.8) * 0.5,
            initial_angle: i as f32 / 5.0 * TAU,
            ring: false,
            texture: textures[i].to_string(),
        });
    }
    let avg = planets.iter().map(|p| p.size).sum::<f32>() / planets.len() as f32;

    // Sixth planet sits on the outermost orbit and wears the ring.
    planets.push(PlanetSpec {
        name: names[5].to_string(),
        size: avg,
        base_speed: 0.0029 * SPEED_FACTOR,
        orbit_radius: (7.0 + 6.0 * 1.8 + 2.0) * 0.5,
        initial_angle: 5.0 / 7.0 * TAU,
        ring: true,
        texture: textures[5].to_string(),
    });
    planets.push(PlanetSpec {
        name: names[6].to_string(),
        size: avg,
        base_speed: 0.0018 * SPEED_FACTOR,
        orbit_radius: (7.0 + 5.0 * 1.8) * 0.5,
        initial_angle: 6.0 / 7.0 * TAU,
        ring: false,
        texture: textures[6].to_string(),
    });
    planets
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            planets: default_planets(),
            model_url: default_model_url(),
            tooltips: default_tooltips(),
            tunnel_stars: default_tunnel_stars(),
            seed: 0,
        }
    }
}

impl UniverseConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the controllers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planets.len() != BODY_COUNT {
            return Err(ConfigError::BodyCount {
                expected: BODY_COUNT,
                found: self.planets.len(),
            });
        }
        for (index, planet) in self.planets.iter().enumerate() {
            if !(planet.size.is_finite() && planet.size > 0.0) {
                return Err(ConfigError::InvalidPlanet { index, reason: "size must be positive" });
            }
            if !(planet.orbit_radius.is_finite() && planet.orbit_radius > 0.0) {
                return Err(ConfigError::InvalidPlanet { index, reason: "orbit radius must be positive" });
            }
            if !planet.base_speed.is_finite() {
                return Err(ConfigError::InvalidPlanet { index, reason: "speed must be finite" });
            }
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_seven_valid_planets() {
        let config = UniverseConfig::default();
        assert_eq!(config.planets.len(), BODY_COUNT);
        assert!(config.validate().is_ok());
        assert_eq!(config.planets.iter().filter(|p| p.ring).count(), 1);
    }

    #[test]
    fn ringed_planet_has_the_outermost_orbit() {
        let config = UniverseConfig::default();
        let outer = config
            .planets
            .iter()
            .max_by(|a, b| a.orbit_radius.total_cmp(&b.orbit_radius))
            .map(|p| p.ring);
        assert_eq!(outer, Some(true));
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = UniverseConfig::from_json("{}").unwrap();
        assert_eq!(config, UniverseConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = UniverseConfig::from_json(r#"{ "tooltips": false, "seed": 9, "tunnel_stars": 800 }"#).unwrap();
        assert!(!config.tooltips);
        assert_eq!(config.seed, 9);
        assert_eq!(config.tunnel_stars, 800);
    }

    #[test]
    fn rejects_wrong_body_count() {
        let json = r#"{ "planets": [
            { "name": "a", "size": 1.0, "base_speed": 0.001, "orbit_radius": 3.0 }
        ] }"#;
        match UniverseConfig::from_json(json) {
            Err(ConfigError::BodyCount { expected, found }) => {
                assert_eq!(expected, 7);
                assert_eq!(found, 1);
            }
            other => panic!("expected BodyCount error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_size() {
        let mut config = UniverseConfig::default();
        config.planets[2].size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPlanet { index: 2, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            UniverseConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
