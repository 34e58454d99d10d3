use std::path::{Path, PathBuf};

use anyhow::Context;

use parallax_engine::logging::{init_logging, LoggingConfig};
use parallax_ui::scene::SceneConfig;
use parallax_ui::Application;

const BUNDLED_PAGE: &str = include_str!("../page/index.mkml");
const GRADIENT: &str = "textures/gradients/5.png";

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    // Optional first argument: a page to load instead of the bundled one.
    let page = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read page {}", path.display()))?,
        None => BUNDLED_PAGE.to_string(),
    };

    let scene = SceneConfig {
        gradient_path: locate_asset(Path::new(GRADIENT), &asset_roots()),
        ..SceneConfig::default()
    };
    log::info!("starting parallax site (gradient {})", scene.gradient_path.display());

    Application::new()
        .title("Parallax Portfolio")
        .size(1280.0, 800.0)
        .scene(scene)
        .run(&page)
}

/// Directories searched for bundled assets: the working directory, then the
/// directory holding the executable.
fn asset_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        roots.push(dir);
    }
    roots
}

/// First `root/rel` that exists. Falls back to `rel` itself, so a missing
/// asset still reaches the loader and gets its fallback texture.
fn locate_asset(rel: &Path, roots: &[PathBuf]) -> PathBuf {
    roots
        .iter()
        .map(|root| root.join(rel))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| rel.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_mkml::parse_str;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("parallax-site-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn asset_found_under_a_later_root() {
        let empty = scratch_dir("empty");
        let exe_dir = scratch_dir("exe");
        std::fs::create_dir_all(exe_dir.join("textures/gradients")).unwrap();
        std::fs::write(exe_dir.join(GRADIENT), b"png").unwrap();

        let found = locate_asset(Path::new(GRADIENT), &[empty.clone(), exe_dir.clone()]);
        assert_eq!(found, exe_dir.join(GRADIENT));

        let _ = std::fs::remove_dir_all(empty);
        let _ = std::fs::remove_dir_all(exe_dir);
    }

    #[test]
    fn missing_asset_stays_relative() {
        let empty = scratch_dir("missing");
        let found = locate_asset(Path::new(GRADIENT), &[empty.clone()]);
        assert_eq!(found, PathBuf::from(GRADIENT));
        let _ = std::fs::remove_dir_all(empty);
    }

    #[test]
    fn bundled_page_uses_default_material_color() {
        let doc = parse_str(BUNDLED_PAGE).unwrap();
        let mut backdrop = None;
        doc.root.walk(&mut |node| {
            if node.widget == "Backdrop" {
                backdrop = Some(node);
            }
        });
        let backdrop = backdrop.expect("bundled page has a Backdrop");
        let cfg = SceneConfig::default().with_node_overrides(backdrop);
        assert_eq!(cfg.material_color, SceneConfig::default().material_color);
    }
}
