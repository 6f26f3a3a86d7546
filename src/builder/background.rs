use std::path::Path;

use log::debug;

use crate::builder::strip_file_url;
use crate::errors::Result;
use crate::extract::slide_data::Background;
use crate::models::page::{Slide, SlideBackground};
use crate::models::presentation::PresLayout;
use crate::page::prepare::canvas_px;
use crate::raster::gradient::Gradient;
use crate::raster::gradient_file_name;

/// Assigns the slide background. Gradients are rendered to a canvas-sized
/// PNG in `tmp_dir` first.
pub async fn apply_background(
    slide: &mut Slide,
    background: &Background,
    layout: &PresLayout,
    tmp_dir: &Path,
) -> Result<()> {
    let fill = match background {
        Background::Image { path } if background.is_gradient() => {
            let (width, height) = canvas_px(layout);
            let png = Gradient::parse(path)?.to_png(width, height)?;
            let file = tmp_dir.join(gradient_file_name(path));
            tokio::fs::write(&file, png).await?;
            debug!("rendered gradient background to {}", file.display());
            SlideBackground::Picture(file.to_string_lossy().into_owned())
        }
        Background::Image { path } => SlideBackground::Picture(strip_file_url(path)),
        Background::Color { value } => SlideBackground::Color(*value),
    };
    slide.set_background(fill);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::colors::RgbColor;

    #[tokio::test]
    async fn gradient_background_is_written_to_tmp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut slide = Slide::new("s");
        let background = Background::Image {
            path: "linear-gradient(135deg, rgb(31, 78, 121) 0%, rgb(46, 117, 182) 100%)".into(),
        };
        apply_background(&mut slide, &background, &PresLayout::LAYOUT_16X9, dir.path())
            .await
            .unwrap();
        let Some(SlideBackground::Picture(path)) = &slide.background else {
            panic!("expected picture background")
        };
        let file_name = Path::new(path).file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("gradient-") && file_name.ends_with(".png"));
        let image = image::open(path).unwrap();
        assert_eq!((image.width(), image.height()), (960, 540));
    }

    #[tokio::test]
    async fn plain_backgrounds_are_assigned_directly() {
        let dir = tempfile::tempdir().unwrap();
        let mut slide = Slide::new("s");
        let picture = Background::Image {
            path: "file:///tmp/bg%20photo.png".into(),
        };
        apply_background(&mut slide, &picture, &PresLayout::LAYOUT_16X9, dir.path())
            .await
            .unwrap();
        assert_eq!(slide.background, Some(SlideBackground::Picture("/tmp/bg photo.png".into())));

        let color = Background::Color { value: RgbColor::new(1, 2, 3) };
        apply_background(&mut slide, &color, &PresLayout::LAYOUT_16X9, dir.path())
            .await
            .unwrap();
        assert_eq!(slide.background, Some(SlideBackground::Color(RgbColor::new(1, 2, 3))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
