use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use promo_core::{PromoError, PromoResult};
use promo_scene::markup::document;
use promo_scene::{CompositionDescriptor, CompositionRegistry};

pub const MANIFEST_FILE: &str = "bundle.json";
pub const STYLESHEET_FILE: &str = "style.css";
const MANIFEST_VERSION: u32 = 1;

const STYLESHEET: &str = "\
*, *::before, *::after { box-sizing: border-box; }
html, body { background: #0a0e14; color: #e6edf3; }
body { -webkit-font-smoothing: antialiased; text-rendering: geometricPrecision; }
button { font: inherit; cursor: default; }
";

/// Contents of `bundle.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    pub version: u32,
    pub compositions: Vec<CompositionDescriptor>,
    /// Relative path to sha256 of every written file except the manifest.
    pub files: BTreeMap<String, String>,
}

/// A bundled project on disk.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub root: PathBuf,
    /// Directory URL the browser loads pages from, with a trailing slash.
    pub serve_url: Url,
    pub manifest: BundleManifest,
}

impl Bundle {
    /// Look up a composition's metadata by id.
    pub fn select(&self, id: &str) -> PromoResult<&CompositionDescriptor> {
        self.manifest
            .compositions
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                let known: Vec<&str> = self
                    .manifest
                    .compositions
                    .iter()
                    .map(|c| c.id.as_str())
                    .collect();
                PromoError::unknown_composition(id, &known)
            })
    }

    /// URL of the page showing `frame` of composition `id`.
    pub fn frame_url(&self, id: &str, frame: u32) -> PromoResult<String> {
        let comp = self.select(id)?;
        if frame >= comp.duration_in_frames {
            return Err(PromoError::Bundle(format!(
                "frame {} is outside '{}' (0..{})",
                frame, id, comp.duration_in_frames
            )));
        }
        let url = self.serve_url.join(&frame_page(id, frame)).map_err(|e| {
            PromoError::Bundle(format!("bad page url for '{}' frame {}: {}", id, frame, e))
        })?;
        Ok(url.into())
    }

    /// Re-hash every file listed in the manifest and report the first mismatch.
    pub fn verify(&self) -> PromoResult<()> {
        for (rel, expected) in &self.manifest.files {
            let bytes = fs::read(self.root.join(rel))
                .map_err(|e| PromoError::Bundle(format!("{}: {}", rel, e)))?;
            let actual = fingerprint(&bytes);
            if &actual != expected {
                return Err(PromoError::Bundle(format!(
                    "{} was modified after bundling (sha256 {} != {})",
                    rel, actual, expected
                )));
            }
        }
        Ok(())
    }
}

/// Writes a composition registry out as static pages, one per frame.
#[derive(Debug, Clone)]
pub struct Bundler {
    out_dir: PathBuf,
}

impl Bundler {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Bundle every composition in `registry`. Any previous bundle in the
    /// output directory is replaced.
    pub fn bundle(&self, registry: &CompositionRegistry) -> PromoResult<Bundle> {
        if self.out_dir.exists() {
            fs::remove_dir_all(&self.out_dir)?;
        }
        fs::create_dir_all(&self.out_dir)?;

        let mut files = BTreeMap::new();
        self.write(&mut files, STYLESHEET_FILE, STYLESHEET.as_bytes())?;

        for comp in registry.iter() {
            let d = &comp.descriptor;
            fs::create_dir_all(self.out_dir.join(&d.id))?;
            for frame in 0..d.duration_in_frames {
                let body = comp.render_frame(frame)?;
                let page = document(&body, d.width, d.height, Some("../style.css"));
                self.write(&mut files, &frame_page(&d.id, frame), page.as_bytes())?;
            }
            tracing::debug!(
                composition = %d.id,
                frames = d.duration_in_frames,
                "bundled composition"
            );
        }

        let manifest = BundleManifest {
            version: MANIFEST_VERSION,
            compositions: registry.descriptors(),
            files,
        };
        fs::write(
            self.out_dir.join(MANIFEST_FILE),
            serde_json::to_vec_pretty(&manifest)?,
        )?;

        let root = self.out_dir.canonicalize()?;
        tracing::info!(
            root = %root.display(),
            files = manifest.files.len(),
            "bundle written"
        );
        Ok(Bundle {
            serve_url: file_url(&root)?,
            root,
            manifest,
        })
    }

    fn write(
        &self,
        files: &mut BTreeMap<String, String>,
        rel: &str,
        bytes: &[u8],
    ) -> PromoResult<()> {
        fs::write(self.out_dir.join(rel), bytes)?;
        files.insert(rel.to_string(), fingerprint(bytes));
        Ok(())
    }
}

/// Bundle-relative path of a frame page.
pub fn frame_page(id: &str, frame: u32) -> String {
    format!("{}/{:05}.html", id, frame)
}

fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// `file://` URL of an absolute directory.
pub fn file_url(path: &Path) -> PromoResult<Url> {
    Url::from_directory_path(path).map_err(|()| {
        PromoError::Bundle(format!(
            "bundle root must be absolute: {}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use promo_scene::{Composition, Element, VideoConfig};

    fn registry() -> CompositionRegistry {
        let mut reg = CompositionRegistry::new();
        reg.register(Composition::video(
            "Clip",
            3,
            30.0,
            64,
            32,
            |frame: u32, _: &VideoConfig| Element::div().text(format!("frame {}", frame)),
        ))
        .unwrap();
        reg.register(Composition::still("Card", 16, 16, |_: u32, _: &VideoConfig| {
            Element::div().text("card")
        }))
        .unwrap();
        reg
    }

    #[test]
    fn test_bundle_writes_one_page_per_frame() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundler::new(dir.path().join("bundle")).bundle(&registry()).unwrap();

        for frame in 0..3 {
            let page = fs::read_to_string(bundle.root.join(frame_page("Clip", frame))).unwrap();
            assert!(page.contains(&format!("<div>frame {}</div>", frame)));
            assert!(page.contains("width: 64px; height: 32px;"));
        }
        assert!(!bundle.root.join("Clip/00003.html").exists());
        assert!(bundle.root.join("Card/00000.html").exists());
        assert!(bundle.root.join(STYLESHEET_FILE).exists());
        // stylesheet + 3 video frames + 1 still
        assert_eq!(bundle.manifest.files.len(), 5);
    }

    #[test]
    fn test_manifest_on_disk_matches_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundler::new(dir.path().join("bundle")).bundle(&registry()).unwrap();
        let raw = fs::read_to_string(bundle.root.join(MANIFEST_FILE)).unwrap();
        let on_disk: BundleManifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk, bundle.manifest);
        assert_eq!(bundle.serve_url.scheme(), "file");
        bundle.verify().unwrap();
    }

    #[test]
    fn test_select_and_frame_url() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundler::new(dir.path().join("bundle")).bundle(&registry()).unwrap();

        let clip = bundle.select("Clip").unwrap();
        assert_eq!((clip.width, clip.height, clip.duration_in_frames), (64, 32, 3));

        let url = bundle.frame_url("Clip", 2).unwrap();
        assert!(url.ends_with("/Clip/00002.html"), "{}", url);
        assert!(bundle.frame_url("Clip", 3).is_err());

        let err = bundle.select("Nope").unwrap_err().to_string();
        assert!(err.contains("Clip") && err.contains("Card"));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundler::new(dir.path().join("bundle")).bundle(&registry()).unwrap();
        fs::write(bundle.root.join("Card/00000.html"), "tampered").unwrap();
        let err = bundle.verify().unwrap_err().to_string();
        assert!(err.contains("Card/00000.html"), "{}", err);
    }

    #[test]
    fn test_rebundle_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bundle");
        fs::create_dir_all(out.join("Stale")).unwrap();
        fs::write(out.join("Stale/00000.html"), "old").unwrap();
        let bundle = Bundler::new(&out).bundle(&registry()).unwrap();
        assert!(!bundle.root.join("Stale").exists());
    }

    #[test]
    fn test_file_url() {
        assert!(file_url(Path::new("relative/dir")).is_err());
        #[cfg(unix)]
        assert_eq!(
            file_url(Path::new("/tmp/my bundle")).unwrap().as_str(),
            "file:///tmp/my%20bundle/"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_frame_url_survives_reserved_characters_in_root() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("C# a?b").join("bundle");
        let bundle = Bundler::new(&out).bundle(&registry()).unwrap();

        let url = Url::parse(&bundle.frame_url("Clip", 2).unwrap()).unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), None);
        let path = url.to_file_path().unwrap();
        assert_eq!(path, bundle.root.join("Clip").join("00002.html"));
        assert!(path.is_file());
    }
}
