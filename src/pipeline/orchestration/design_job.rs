use std::path::Path;

use tracing::{info, warn};

use crate::error::AppError;
use crate::pipeline::services::image::Composite;
use crate::pipeline::services::style::StyleCatalog;

/// Rejects a style no region of the catalog offers, before any image work starts.
pub fn ensure_style_offered(catalog: &StyleCatalog, style: &str) -> Result<(), AppError> {
    if catalog.style_exists(style) {
        Ok(())
    } else {
        Err(AppError::UnknownStyle(style.to_string()))
    }
}

/// Style names and region types of a catalog, one line each.
pub fn catalog_listing(catalog: &StyleCatalog) -> String {
    let styles: Vec<_> = catalog.styles().into_iter().collect();
    let regions: Vec<_> = catalog.regions().map(|r| r.as_str()).collect();
    format!(
        "Styles: {}\nRegions: {}",
        styles.join(", "),
        regions.join(", ")
    )
}

/// Saves the styled image, then the blended one.
///
/// A failed blended write removes the styled file so no half-finished pair is
/// left behind.
pub fn write_composite(
    composite: &Composite,
    styled_path: &Path,
    blended_path: &Path,
) -> Result<(), AppError> {
    info!("Saving styled image to {}", styled_path.display());
    composite.styled.save(styled_path)?;

    info!("Saving blended image to {}", blended_path.display());
    if let Err(e) = composite.blended.save(blended_path) {
        if let Err(cleanup) = std::fs::remove_file(styled_path) {
            warn!(
                "Could not remove partial output {}: {}",
                styled_path.display(),
                cleanup
            );
        }
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;
    use uuid::Uuid;

    const CATALOG: &str = r##"{
        "roof": {"rustic": [{"color":"#553311","texture":"rough","material":"slate","finish":"matte","rating":3,"keywords":[]}]},
        "windows": {"modern": [{"color":"#0000FF","texture":"glass","material":"glass","finish":"gloss","rating":4.5,"keywords":[]}], "rustic": []}
    }"##;

    fn composite() -> Composite {
        Composite {
            styled: RgbImage::from_pixel(4, 3, Rgb([200, 10, 10])),
            blended: RgbImage::from_pixel(4, 3, Rgb([100, 5, 5])),
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.png", name, Uuid::new_v4()))
    }

    #[test]
    fn test_offered_style_passes() {
        let catalog = StyleCatalog::from_json_str(CATALOG).unwrap();
        assert!(ensure_style_offered(&catalog, "modern").is_ok());
        assert!(ensure_style_offered(&catalog, "rustic").is_ok());
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let catalog = StyleCatalog::from_json_str(CATALOG).unwrap();
        match ensure_style_offered(&catalog, "ghost") {
            Err(AppError::UnknownStyle(style)) => assert_eq!(style, "ghost"),
            other => panic!("expected UnknownStyle, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_listing() {
        let catalog = StyleCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(
            catalog_listing(&catalog),
            "Styles: rustic, modern\nRegions: roof, windows"
        );
    }

    #[test]
    fn test_both_images_are_written() {
        let styled_path = scratch_path("styled");
        let blended_path = scratch_path("blended");

        write_composite(&composite(), &styled_path, &blended_path).unwrap();

        let styled = image::open(&styled_path).unwrap().to_rgb8();
        let blended = image::open(&blended_path).unwrap().to_rgb8();
        std::fs::remove_file(&styled_path).unwrap();
        std::fs::remove_file(&blended_path).unwrap();

        assert_eq!(styled.get_pixel(0, 0), &Rgb([200, 10, 10]));
        assert_eq!(blended.get_pixel(3, 2), &Rgb([100, 5, 5]));
    }

    #[test]
    fn test_failed_blended_write_removes_styled_image() {
        let styled_path = scratch_path("styled");
        let blended_path = std::env::temp_dir()
            .join(format!("missing-{}", Uuid::new_v4()))
            .join("blended.png");

        let result = write_composite(&composite(), &styled_path, &blended_path);

        assert!(result.is_err());
        assert!(!styled_path.exists());
        assert!(!blended_path.exists());
    }
}
