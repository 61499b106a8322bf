use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Resizes to the network input and lays the pixels out as a normalized
/// NCHW tensor: `(pixel / 255 - mean) / std` per channel.
pub fn image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    mean: [f32; 3],
    std: [f32; 3],
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    if std.iter().any(|s| *s == 0.0) {
        return Err("channel std must be non-zero".into());
    }

    let rgb = image
        .resize_exact(width, height, imageops::FilterType::Triangle)
        .to_rgb8();

    let tensor = tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            (pixel[c] as f32 / 255.0 - mean[c]) / std[c]
        },
    );

    Ok(tensor.into_tensor())
}
