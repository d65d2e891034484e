use crate::geometry::FACE_COUNT;
use glium::backend::Facade;
use glium::texture::{MipmapsOption, RawImage2d, Texture2d};
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Every face texture is resampled to this square size before upload.
pub const TEXTURE_SIZE: u32 = 200;

#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("expected {expected} face textures, got {actual}")]
    FaceCount { expected: usize, actual: usize },

    #[error("could not decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not upload {path} to the GPU: {source}")]
    Upload {
        path: PathBuf,
        #[source]
        source: glium::texture::TextureCreationError,
    },
}

/// One GPU texture per cube face, in face order. Texture i binds to face i.
pub struct TextureSet {
    textures: Vec<Texture2d>,
    paths: Vec<PathBuf>,
}

impl TextureSet {
    /// Loads, resamples and uploads all 6 face images. Any unreadable image
    /// fails the whole set; there is no partial cube.
    pub fn load<F: ?Sized + Facade>(
        facade: &F,
        paths: &[PathBuf],
    ) -> Result<TextureSet, AssetLoadError> {
        if paths.len() != FACE_COUNT {
            return Err(AssetLoadError::FaceCount {
                expected: FACE_COUNT,
                actual: paths.len(),
            });
        }

        let mut textures = Vec::with_capacity(FACE_COUNT);
        for path in paths {
            textures.push(upload(facade, path)?);
        }

        Ok(TextureSet {
            textures,
            paths: paths.to_vec(),
        })
    }

    /// Re-reads every source image and swaps in the new handles. Only meant
    /// for the debug reload path; contents are static in normal runs.
    pub fn reload<F: ?Sized + Facade>(&mut self, facade: &F) -> Result<(), AssetLoadError> {
        let mut textures = Vec::with_capacity(FACE_COUNT);
        for path in &self.paths {
            textures.push(upload(facade, path)?);
        }
        self.textures = textures;
        Ok(())
    }

    pub fn get(&self, face: usize) -> &Texture2d {
        &self.textures[face]
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn upload<F: ?Sized + Facade>(facade: &F, path: &Path) -> Result<Texture2d, AssetLoadError> {
    let data = decode_rgb(path)?;
    // Row order is flipped on upload so the image origin lands bottom-left,
    // matching the texture coordinate convention.
    let raw = RawImage2d::from_raw_rgb_reversed(&data, (TEXTURE_SIZE, TEXTURE_SIZE));
    Texture2d::with_mipmaps(facade, raw, MipmapsOption::NoMipmap).map_err(|source| {
        AssetLoadError::Upload {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Decodes an image and resamples it to a 200x200 row-major RGB byte buffer.
fn decode_rgb(path: &Path) -> Result<Vec<u8>, AssetLoadError> {
    let image = image::open(path).map_err(|source| AssetLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let resized = image.resize_exact(TEXTURE_SIZE, TEXTURE_SIZE, FilterType::Triangle);
    Ok(resized.to_rgb8().into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn decode_resamples_to_fixed_rgb_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        let mut source = RgbImage::new(16, 8);
        source.put_pixel(0, 0, Rgb([255, 0, 0]));
        source.save(&path).unwrap();

        let data = decode_rgb(&path).unwrap();
        assert_eq!(data.len(), (TEXTURE_SIZE * TEXTURE_SIZE * 3) as usize);
    }

    #[test]
    fn missing_image_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        match decode_rgb(&path) {
            Err(AssetLoadError::Decode { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a decode error, got {:?}", other.map(|d| d.len())),
        }
    }
}
