use crate::image_classifier::model_config::ModelConfig;
use chrono::Offset;
use clap::Parser;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub model: ModelConfig,
    /// Serve predictions from the fake classifier instead of the ONNX model.
    pub fake_model: bool,
    pub window: WindowConfig,
    pub user_agent: String,
    pub initial_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: utc(),
            model: ModelConfig::default(),
            fake_model: false,
            window: WindowConfig {
                title: "Image Classifier".to_string(),
                width: 640.0,
                height: 720.0,
            },
            user_agent: format!("image-url-classifier/{}", env!("CARGO_PKG_VERSION")),
            initial_url: None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Classify an image by URL with a pretrained MobileNet")]
pub struct Args {
    /// Path to the MobileNet ONNX file
    #[arg(long)]
    pub model: Option<String>,

    /// Path to the ImageNet labels file, one label per line
    #[arg(long)]
    pub labels: Option<String>,

    /// Image URL to load on startup
    #[arg(long)]
    pub url: Option<String>,

    /// Number of predictions shown in the table
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Use the fake classifier (no model files needed)
    #[arg(long)]
    pub fake: bool,

    /// Logger offset from UTC in hours
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config = Config::default();

        if let Some(model) = args.model {
            config.model.onnx_model_path = model;
        }
        if let Some(labels) = args.labels {
            config.model.labels_path = labels;
        }
        if let Some(top_k) = args.top_k {
            config.model.top_k = top_k;
        }
        if let Some(hours) = args.utc_offset {
            config.logger_timezone = chrono::FixedOffset::east_opt(hours * 3600)
                .ok_or_else(|| format!("invalid UTC offset: {}", hours))?;
        }
        config.initial_url = args.url;
        config.fake_model = args.fake;

        Ok(config)
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pretrained_mobilenet() {
        let config = Config::default();

        assert_eq!(config.model.input_shape, (224, 224));
        assert_eq!(config.model.top_k, 3);
        assert!(!config.fake_model);
        assert!(config.initial_url.is_none());
    }

    #[test]
    fn test_from_args_overrides() {
        let args = Args::parse_from([
            "image-url-classifier",
            "--model",
            "/tmp/mobilenet.onnx",
            "--labels",
            "/tmp/labels.txt",
            "--url",
            "https://i.imgur.com/YPx3pRi.jpg",
            "--top-k",
            "5",
            "--utc-offset",
            "-7",
            "--fake",
        ]);

        let config = Config::from_args(args).unwrap();

        assert_eq!(config.model.onnx_model_path, "/tmp/mobilenet.onnx");
        assert_eq!(config.model.labels_path, "/tmp/labels.txt");
        assert_eq!(
            config.initial_url.as_deref(),
            Some("https://i.imgur.com/YPx3pRi.jpg")
        );
        assert_eq!(config.model.top_k, 5);
        assert_eq!(config.logger_timezone.local_minus_utc(), -7 * 3600);
        assert!(config.fake_model);
    }

    #[test]
    fn test_from_args_rejects_out_of_range_offset() {
        let args = Args::parse_from(["image-url-classifier", "--utc-offset", "30"]);

        assert!(Config::from_args(args).is_err());
    }
}
