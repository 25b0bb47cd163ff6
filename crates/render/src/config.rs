use serde::{Deserialize, Serialize};

/// Canvas, colours and physics of the interactive view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub height: String,
    pub width: String,
    pub directed: bool,
    pub bgcolor: String,
    pub font_color: String,
    pub filter_menu: bool,
    /// vis-network script URL.
    pub cdn_url: String,
    pub physics: PhysicsConfig,
}

/// Serialized as-is into the vis-network `physics` option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    pub solver: String,
    pub force_atlas2_based: ForceAtlas2Based,
    pub min_velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForceAtlas2Based {
    pub gravitational_constant: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_constant: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height: "1200px".to_string(),
            width: "100%".to_string(),
            directed: true,
            bgcolor: "#222222".to_string(),
            font_color: "white".to_string(),
            filter_menu: true,
            cdn_url: "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/vis-network.min.js"
                .to_string(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            solver: "forceAtlas2Based".to_string(),
            force_atlas2_based: ForceAtlas2Based::default(),
            min_velocity: 0.75,
        }
    }
}

impl Default for ForceAtlas2Based {
    fn default() -> Self {
        Self {
            gravitational_constant: -100.0,
            central_gravity: 0.01,
            spring_length: 200.0,
            spring_constant: 0.08,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_option_names() {
        let value = serde_json::to_value(PhysicsConfig::default()).unwrap();

        assert_eq!(value["solver"], "forceAtlas2Based");
        assert_eq!(value["minVelocity"], 0.75);
        assert_eq!(value["forceAtlas2Based"]["gravitationalConstant"], -100.0);
        assert_eq!(value["forceAtlas2Based"]["centralGravity"], 0.01);
        assert_eq!(value["forceAtlas2Based"]["springLength"], 200.0);
        assert_eq!(value["forceAtlas2Based"]["springConstant"], 0.08);
    }

    #[test]
    fn test_partial_override() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"height": "800px", "physics": {"minVelocity": 1.5}}"#).unwrap();

        assert_eq!(config.height, "800px");
        assert_eq!(config.physics.min_velocity, 1.5);
        assert_eq!(config.physics.solver, "forceAtlas2Based");
        assert_eq!(config.bgcolor, "#222222");
    }
}
