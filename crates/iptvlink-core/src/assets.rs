//! Poster asset-catalog generator
//!
//! Turns `poster_<n>.webp`/`.jpg` demo artwork into Xcode imagesets: one
//! PNG plus a `Contents.json` manifest per poster.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// Source extensions tried in order
const SOURCE_EXTENSIONS: [&str; 2] = ["webp", "jpg"];

/// Converts an image file to PNG
pub trait ImageConverter {
    fn convert_to_png(&self, source: &Path, destination: &Path) -> Result<()>;
}

/// Converter backed by macOS `sips`
#[derive(Debug, Clone, Copy, Default)]
pub struct SipsConverter;

impl ImageConverter for SipsConverter {
    fn convert_to_png(&self, source: &Path, destination: &Path) -> Result<()> {
        let status = Command::new("sips")
            .args(["-s", "format", "png"])
            .arg(source)
            .arg("--out")
            .arg(destination)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ToolError::Conversion(format!("failed to run sips: {}", e)))?;

        if !status.success() {
            return Err(ToolError::Conversion(format!(
                "sips exited with {} for {}",
                status,
                source.display()
            )));
        }
        Ok(())
    }
}

/// One entry of an imageset's `images` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub idiom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub scale: String,
}

/// `info` block of an asset-catalog manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub version: u32,
    pub author: String,
}

/// `Contents.json` of an imageset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesetManifest {
    pub images: Vec<ImageEntry>,
    pub info: ManifestInfo,
}

impl ImagesetManifest {
    /// Manifest with `filename` at 1x and empty 2x/3x slots
    pub fn single_scale(filename: &str) -> Self {
        let entry = |scale: &str, filename: Option<&str>| ImageEntry {
            idiom: "universal".to_string(),
            filename: filename.map(str::to_string),
            scale: scale.to_string(),
        };

        Self {
            images: vec![
                entry("1x", Some(filename)),
                entry("2x", None),
                entry("3x", None),
            ],
            info: ManifestInfo {
                version: 1,
                author: "xcode".to_string(),
            },
        }
    }
}

/// Counts of imagesets produced by a job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSummary {
    pub created: Vec<String>,
    pub missing: Vec<String>,
    pub failed: Vec<String>,
}

/// Generates `<prefix>_<n>.imageset` folders for a range of indices
#[derive(Debug, Clone)]
pub struct PosterAssetJob {
    pub source_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub first: u32,
    pub last: u32,
    pub prefix: String,
}

impl PosterAssetJob {
    /// Job over `poster_1` to `poster_15`
    pub fn new(source_dir: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            assets_dir: assets_dir.into(),
            first: 1,
            last: 15,
            prefix: "poster".to_string(),
        }
    }

    /// First existing source image for `asset_name`, trying webp then jpg
    pub fn locate_source(&self, asset_name: &str) -> Option<PathBuf> {
        SOURCE_EXTENSIONS
            .iter()
            .map(|ext| self.source_dir.join(format!("{}.{}", asset_name, ext)))
            .find(|path| path.exists())
    }

    /// Run the job
    ///
    /// Missing sources and failed conversions are logged and skipped.
    ///
    /// # Errors
    /// `Io` if the asset directory or an imageset folder cannot be created
    pub fn run(&self, converter: &dyn ImageConverter) -> Result<AssetSummary> {
        fs::create_dir_all(&self.assets_dir)?;

        let mut summary = AssetSummary::default();
        for index in self.first..=self.last {
            let asset_name = format!("{}_{}", self.prefix, index);
            let imageset = self.assets_dir.join(format!("{}.imageset", asset_name));
            fs::create_dir_all(&imageset)?;

            let Some(source) = self.locate_source(&asset_name) else {
                tracing::warn!(asset = %asset_name, "could not find source image");
                summary.missing.push(asset_name);
                continue;
            };

            match self.write_imageset(&asset_name, &source, &imageset, converter) {
                Ok(()) => {
                    tracing::info!(asset = %asset_name, "created PNG imageset");
                    summary.created.push(asset_name);
                }
                Err(e) => {
                    tracing::warn!(asset = %asset_name, error = %e, "failed to create imageset");
                    summary.failed.push(asset_name);
                }
            }
        }

        Ok(summary)
    }

    fn write_imageset(
        &self,
        asset_name: &str,
        source: &Path,
        imageset: &Path,
        converter: &dyn ImageConverter,
    ) -> Result<()> {
        let png_name = format!("{}.png", asset_name);
        converter.convert_to_png(source, &imageset.join(&png_name))?;

        let manifest = ImagesetManifest::single_scale(&png_name);
        fs::write(
            imageset.join("Contents.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Copies bytes instead of converting and records calls
    #[derive(Default)]
    struct CopyConverter {
        calls: RefCell<Vec<PathBuf>>,
        fail_on: Option<String>,
    }

    impl ImageConverter for CopyConverter {
        fn convert_to_png(&self, source: &Path, destination: &Path) -> Result<()> {
            self.calls.borrow_mut().push(source.to_path_buf());
            if let Some(name) = &self.fail_on
                && source.to_string_lossy().contains(name.as_str())
            {
                return Err(ToolError::Conversion("forced failure".to_string()));
            }
            fs::copy(source, destination)?;
            Ok(())
        }
    }

    #[test]
    fn test_manifest_shape() {
        let manifest = ImagesetManifest::single_scale("poster_1.png");
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({
                "images": [
                    {"idiom": "universal", "filename": "poster_1.png", "scale": "1x"},
                    {"idiom": "universal", "scale": "2x"},
                    {"idiom": "universal", "scale": "3x"}
                ],
                "info": {"version": 1, "author": "xcode"}
            })
        );
    }

    #[test]
    fn test_locate_source_prefers_webp() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("poster_1.jpg"), b"jpg").unwrap();
        fs::write(src.path().join("poster_1.webp"), b"webp").unwrap();
        fs::write(src.path().join("poster_2.jpg"), b"jpg").unwrap();

        let job = PosterAssetJob::new(src.path(), src.path().join("Assets.xcassets"));
        assert_eq!(job.locate_source("poster_1"), Some(src.path().join("poster_1.webp")));
        assert_eq!(job.locate_source("poster_2"), Some(src.path().join("poster_2.jpg")));
        assert_eq!(job.locate_source("poster_3"), None);
    }

    #[test]
    fn test_run_creates_imagesets_and_reports_missing() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let assets = out.path().join("Assets.xcassets");
        fs::write(src.path().join("poster_1.webp"), b"one").unwrap();
        fs::write(src.path().join("poster_3.jpg"), b"three").unwrap();

        let mut job = PosterAssetJob::new(src.path(), &assets);
        job.last = 3;
        let converter = CopyConverter::default();
        let summary = job.run(&converter).unwrap();

        assert_eq!(summary.created, vec!["poster_1", "poster_3"]);
        assert_eq!(summary.missing, vec!["poster_2"]);
        assert!(summary.failed.is_empty());
        assert_eq!(converter.calls.borrow().len(), 2);

        let imageset = assets.join("poster_1.imageset");
        assert_eq!(fs::read(imageset.join("poster_1.png")).unwrap(), b"one");
        let manifest: ImagesetManifest =
            serde_json::from_str(&fs::read_to_string(imageset.join("Contents.json")).unwrap()).unwrap();
        assert_eq!(manifest.images[0].filename.as_deref(), Some("poster_1.png"));

        // Folder exists even when the source is missing
        assert!(assets.join("poster_2.imageset").is_dir());
        assert!(!assets.join("poster_2.imageset/Contents.json").exists());
    }

    #[test]
    fn test_run_conversion_failure_is_skipped() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(src.path().join("poster_1.jpg"), b"one").unwrap();
        fs::write(src.path().join("poster_2.jpg"), b"two").unwrap();

        let mut job = PosterAssetJob::new(src.path(), out.path());
        job.last = 2;
        let converter = CopyConverter {
            fail_on: Some("poster_1".to_string()),
            ..Default::default()
        };
        let summary = job.run(&converter).unwrap();

        assert_eq!(summary.failed, vec!["poster_1"]);
        assert_eq!(summary.created, vec!["poster_2"]);
        assert!(!out.path().join("poster_1.imageset/Contents.json").exists());
    }
}
