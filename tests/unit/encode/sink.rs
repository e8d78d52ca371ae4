use super::*;
use crate::paint::color::Color;

fn frame(w: u32, h: u32, c: Color) -> Raster {
    Raster::new(w, h, c).unwrap()
}

#[test]
fn config_validation() {
    assert!(ExportConfig::new(2, 2, 30).validate().is_ok());
    assert!(ExportConfig::new(0, 2, 30).validate().is_err());
    assert!(ExportConfig::new(2, 2, 0).validate().is_err());
    assert_eq!(ExportConfig::default(), ExportConfig::new(1920, 1080, 30));
}

#[test]
fn frames_are_kept_in_call_order_with_repeats() {
    let mut ex = InMemoryExporter::new(ExportConfig::new(2, 2, 10));
    let red = frame(2, 2, Color::rgb(255, 0, 0));
    let blue = frame(2, 2, Color::rgb(0, 0, 255));
    export(&mut ex, |ex| {
        ex.add_frame(&red, 2)?;
        ex.add_frame(&blue, 1)?;
        ex.add_frame(&red, 0)
    })
    .unwrap();

    let got: Vec<_> = ex.frames().iter().map(|f| f.pixel(0, 0).unwrap()).collect();
    assert_eq!(got, vec![red.pixel(0, 0).unwrap(), red.pixel(0, 0).unwrap(), blue.pixel(0, 0).unwrap()]);
    assert!(!ex.is_active());
}

#[test]
fn mismatched_frame_is_rejected_without_output() {
    let mut ex = InMemoryExporter::new(ExportConfig::new(4, 4, 10));
    let err = export(&mut ex, |ex| ex.add_frame(&frame(4, 3, Color::WHITE), 3)).unwrap_err();
    assert!(matches!(err, DynfigureError::Validation(_)));
    assert!(ex.frames().is_empty());
    assert!(!ex.is_active());
}

#[test]
fn add_frame_requires_begin() {
    let mut ex = InMemoryExporter::new(ExportConfig::new(1, 1, 1));
    assert!(ex.add_frame(&frame(1, 1, Color::WHITE), 1).is_err());
}

struct FailingFinish {
    finished: bool,
}

impl Exporter for FailingFinish {
    fn config(&self) -> ExportConfig {
        ExportConfig::new(1, 1, 1)
    }

    fn begin(&mut self) -> DynfigureResult<()> {
        Ok(())
    }

    fn add_frame(&mut self, _frame: &Raster, _repeat: u32) -> DynfigureResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> DynfigureResult<()> {
        self.finished = true;
        Err(DynfigureError::encode("converter exited with status 1"))
    }
}

#[test]
fn finish_runs_after_body_error_and_does_not_mask_it() {
    let mut ex = FailingFinish { finished: false };
    let err = export(&mut ex, |_| -> DynfigureResult<()> {
        Err(DynfigureError::validation("body failed"))
    })
    .unwrap_err();
    assert!(ex.finished);
    assert!(err.to_string().contains("body failed"));
}

#[test]
fn finish_error_surfaces_when_body_succeeds() {
    let mut ex = FailingFinish { finished: false };
    let err = export(&mut ex, |_| Ok(())).unwrap_err();
    assert!(matches!(err, DynfigureError::Encode(_)));
}
