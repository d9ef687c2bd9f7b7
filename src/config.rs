//! Pipeline configuration, loadable from TOML.
//!
//! ```toml
//! display-clock = true
//! process-mode = "hw"
//! hw-blend-color-attr = "0,0.0,1.0,0.0,0.3:1,0.0,1.0,1.0,0.3"
//!
//! [broker]
//! host = "rabbitmq.local"
//! queue = "detections"
//! ```

use serde::Deserialize;

use crate::error::ConfigError;
use crate::metadata::ConnectionParams;
use crate::overlay::{
    ClockParams, Color, ColorPalette, DEFAULT_BORDER_WIDTH, DisplayToggles, FontParams,
    MAX_FONT_SIZE, RenderMode,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OsdConfig {
    pub display_clock: bool,
    pub display_text: bool,
    pub display_bbox: bool,
    pub display_mask: bool,
    pub display_coord: bool,
    pub clock_font: String,
    pub clock_font_size: u32,
    pub x_clock_offset: u32,
    pub y_clock_offset: u32,
    /// Packed `0xRRGGBBAA`; opaque red when unset.
    pub clock_color: Option<u32>,
    pub process_mode: RenderMode,
    /// `classId,r,g,b,a:...`; the builtin palette when unset.
    pub hw_blend_color_attr: Option<String>,
    pub border_width: u32,
    pub broker: BrokerConfig,
}

impl Default for OsdConfig {
    fn default() -> Self {
        Self {
            display_clock: false,
            display_text: true,
            display_bbox: true,
            display_mask: false,
            display_coord: true,
            clock_font: "Serif".to_string(),
            clock_font_size: 12,
            x_clock_offset: 0,
            y_clock_offset: 0,
            clock_color: None,
            process_mode: RenderMode::default(),
            hw_blend_color_attr: None,
            border_width: DEFAULT_BORDER_WIDTH,
            broker: BrokerConfig::default(),
        }
    }
}

/// Where frame metadata is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub vhost: String,
    pub user: String,
    pub password: String,
    pub queue: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 32094,
            vhost: "tao".to_string(),
            user: "guest".to_string(),
            password: "guest".to_string(),
            queue: "peoplenet-metadata-queue-test".to_string(),
        }
    }
}

impl BrokerConfig {
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.host.clone(),
            port: self.port,
            vhost: self.vhost.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

impl OsdConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: OsdConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything that can be rejected before the first frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clock_params()?;
        self.palette()?;
        Ok(())
    }

    pub fn palette(&self) -> Result<ColorPalette, ConfigError> {
        match &self.hw_blend_color_attr {
            Some(attr) => ColorPalette::parse(attr),
            None => Ok(ColorPalette::builtin()),
        }
    }

    pub fn clock_params(&self) -> Result<ClockParams, ConfigError> {
        if self.clock_font_size > MAX_FONT_SIZE {
            return Err(ConfigError::FontSizeOutOfRange {
                size: self.clock_font_size,
                max: MAX_FONT_SIZE,
            });
        }
        Ok(ClockParams {
            font: FontParams {
                name: self.clock_font.clone(),
                size: self.clock_font_size,
                color: self.clock_color.map_or(Color::RED, Color::from_packed_rgba),
            },
            x_offset: self.x_clock_offset,
            y_offset: self.y_clock_offset,
        })
    }

    pub fn toggles(&self) -> DisplayToggles {
        DisplayToggles {
            bbox: self.display_bbox,
            mask: self.display_mask,
            text: self.display_text,
            clock: self.display_clock,
            coordinates: self.display_coord,
            border_width: self.border_width,
        }
    }
}
