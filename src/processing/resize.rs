//! Resize operation: scales a raster to exact target dimensions.

use std::path::Path;
use image::Limits;
use image::imageops::FilterType;
use crate::core::{OptionSet, Raster};
use crate::utils::{MediaError, MediaResult, SUPPORTED_EXTENSIONS};
use super::operation::{Control, ControlDescriptor, ControlKind, OperationDescriptor, TransformOperation};

pub const RESIZE_OPERATION_ID: &str = "resize";

/// Resizes to the `width` x `height` given in the options.
///
/// Sampling is nearest-neighbour, so the same input always gives the same output and
/// speed wins over smoothness. Aspect ratio is not preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeOperation;

impl ResizeOperation {
    pub fn new() -> Self {
        Self
    }
}

impl TransformOperation for ResizeOperation {
    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            id: RESIZE_OPERATION_ID.to_string(),
            title: "Resize".to_string(),
            category: "Resize/Crop".to_string(),
            icon: "stack".to_string(),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            batch_processable: true,
        }
    }

    fn apply(&self, raster: &Raster, options: &OptionSet) -> MediaResult<Raster> {
        let width = options.require_positive_u32("width")?;
        let height = options.require_positive_u32("height")?;
        check_target_size(raster, width, height)?;

        let resized = raster
            .as_image()
            .resize_exact(width, height, FilterType::Nearest);

        Ok(Raster::from(resized))
    }

    fn describe_controls(&self, file_path: &Path, options: &OptionSet) -> ControlDescriptor {
        let control = |name: &str, label: &str| Control {
            name: name.to_string(),
            label: label.to_string(),
            kind: ControlKind::Integer { min: Some(1), max: None },
            value: options.get(name).cloned(),
        };

        ControlDescriptor {
            operation: RESIZE_OPERATION_ID.to_string(),
            file_path: file_path.to_path_buf(),
            controls: vec![control("width", "Width"), control("height", "Height")],
        }
    }
}

/// Rejects targets whose pixel buffer would exceed the decoder allocation limit.
fn check_target_size(raster: &Raster, width: u32, height: u32) -> MediaResult<()> {
    let Some(max_alloc) = Limits::default().max_alloc else {
        return Ok(());
    };

    let bytes_per_pixel = u64::from(raster.color_model().bytes_per_pixel());
    let needed = u64::from(width)
        .saturating_mul(u64::from(height))
        .saturating_mul(bytes_per_pixel);

    if needed > max_alloc {
        return Err(MediaError::invalid_option(
            "width",
            format!("{width}x{height} needs {needed} bytes, limit is {max_alloc}"),
        ));
    }
    Ok(())
}
