//! Body size checks against the canvas.

use crate::config::Timeouts;
use crate::errors::Result;
use crate::models::presentation::PresLayout;
use crate::page::driver::PageDriver;
use crate::page::prepare::DEVICE_SCALE_FACTOR;
use crate::page::rpc::{self, BodyMetrics};
use crate::page::with_timeout;
use crate::units::{px_to_in, round_to, PT_PER_PX};

/// Largest accepted difference between body and layout, per axis, in inches.
pub const SIZE_TOLERANCE_IN: f64 = 0.1;

/// Reads the body size, snaps the viewport to it, and measures again so the
/// returned scroll sizes reflect the final viewport.
pub async fn measure_body<P: PageDriver + ?Sized>(page: &mut P, timeouts: &Timeouts) -> Result<BodyMetrics> {
    let initial = rpc::body_metrics(page, timeouts).await?;
    let width = initial.width.round().max(1.0) as u32;
    let height = initial.height.round().max(1.0) as u32;
    with_timeout(
        "setting viewport",
        timeouts.evaluation,
        page.set_viewport(width, height, DEVICE_SCALE_FACTOR),
    )
    .await?;
    rpc::body_metrics(page, timeouts).await
}

/// Content spilling past the body, in points, with a 1px rounding tolerance.
pub fn overflow_errors(metrics: &BodyMetrics) -> Vec<String> {
    let width_pt = (metrics.scroll_width - metrics.width - 1.0).max(0.0) * PT_PER_PX;
    let height_pt = (metrics.scroll_height - metrics.height - 1.0).max(0.0) * PT_PER_PX;
    if width_pt <= 0.0 && height_pt <= 0.0 {
        return Vec::new();
    }

    let mut directions = Vec::new();
    if width_pt > 0.0 {
        directions.push(format!("{:.1}pt horizontally", round_to(width_pt, 1)));
    }
    if height_pt > 0.0 {
        directions.push(format!("{:.1}pt vertically", round_to(height_pt, 1)));
    }
    let reminder = if height_pt > 0.0 {
        " (Remember: leave 0.5\" margin at bottom of slide)"
    } else {
        ""
    };
    vec![format!(
        "HTML content overflows body by {}{reminder}",
        directions.join(" and ")
    )]
}

/// Body size versus the presentation layout.
pub fn layout_errors(metrics: &BodyMetrics, layout: &PresLayout) -> Vec<String> {
    let width = px_to_in(metrics.width);
    let height = px_to_in(metrics.height);
    let (expected_width, expected_height) = (layout.width_in(), layout.height_in());
    if (width - expected_width).abs() > SIZE_TOLERANCE_IN || (height - expected_height).abs() > SIZE_TOLERANCE_IN {
        vec![format!(
            "HTML dimensions ({:.1}\" × {:.1}\") don't match presentation layout ({:.1}\" × {:.1}\")",
            round_to(width, 1),
            round_to(height, 1),
            round_to(expected_width, 1),
            round_to(expected_height, 1)
        )]
    } else {
        Vec::new()
    }
}

/// Both dimension checks, overflow first.
pub fn dimension_errors(metrics: &BodyMetrics, layout: &PresLayout) -> Vec<String> {
    let mut errors = overflow_errors(metrics);
    errors.extend(layout_errors(metrics, layout));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::FakePage;

    fn metrics(width: f64, height: f64, scroll_width: f64, scroll_height: f64) -> BodyMetrics {
        BodyMetrics {
            width,
            height,
            scroll_width,
            scroll_height,
        }
    }

    #[test]
    fn exact_canvas_has_no_errors() {
        let body = metrics(960.0, 540.0, 960.0, 540.0);
        assert!(dimension_errors(&body, &PresLayout::LAYOUT_16X9).is_empty());
        let within_tolerance = metrics(965.0, 545.0, 965.0, 545.0);
        assert!(layout_errors(&within_tolerance, &PresLayout::LAYOUT_16X9).is_empty());
    }

    #[test]
    fn one_pixel_of_overflow_is_tolerated() {
        assert!(overflow_errors(&metrics(960.0, 540.0, 961.0, 541.0)).is_empty());
    }

    #[test]
    fn vertical_overflow_reports_points_and_margin_reminder() {
        let errors = overflow_errors(&metrics(960.0, 540.0, 960.0, 581.0));
        assert_eq!(
            errors,
            vec!["HTML content overflows body by 30.0pt vertically (Remember: leave 0.5\" margin at bottom of slide)".to_string()]
        );
    }

    #[test]
    fn half_tenths_round_away_from_zero() {
        let errors = overflow_errors(&metrics(960.0, 540.0, 960.0, 544.0));
        assert!(errors[0].starts_with("HTML content overflows body by 2.3pt vertically"));
        let errors = overflow_errors(&metrics(960.0, 540.0, 968.0, 540.0));
        assert_eq!(errors, vec!["HTML content overflows body by 5.3pt horizontally".to_string()]);
    }

    #[test]
    fn both_axes_are_joined_in_one_message() {
        let errors = overflow_errors(&metrics(960.0, 540.0, 975.0, 551.0));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("HTML content overflows body by 10.5pt horizontally and 7.5pt vertically"));
    }

    #[test]
    fn size_mismatch_names_both_sizes() {
        let errors = layout_errors(&metrics(1280.0, 720.0, 1280.0, 720.0), &PresLayout::LAYOUT_16X9);
        assert_eq!(
            errors,
            vec!["HTML dimensions (13.3\" × 7.5\") don't match presentation layout (10.0\" × 5.6\")".to_string()]
        );
    }

    #[tokio::test]
    async fn measuring_snaps_viewport_to_body() {
        let mut page = FakePage {
            metrics: (959.6, 540.2, 959.6, 600.0),
            ..FakePage::default()
        };
        let body = measure_body(&mut page, &Timeouts::default()).await.unwrap();
        assert_eq!(page.viewports, vec![(960, 540, 3.0)]);
        assert_eq!(body.scroll_height, 600.0);
        assert_eq!(page.calls_to("bodyMetrics"), 2);
    }
}
