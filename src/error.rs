use std::path::PathBuf;

/// Everything that can go wrong while building, rendering or exporting a map.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not load image {path:?}: {source}")]
    LoadImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Icon {name:?} has a {image:?} image but a {mask:?} alpha mask")]
    MaskMismatch {
        name: String,
        image: (u32, u32),
        mask: (u32, u32),
    },

    #[error("Background is {actual:?}, smaller than the {expected:?} map")]
    BackgroundTooSmall {
        actual: (u32, u32),
        expected: (u32, u32),
    },

    #[error("Icon {name:?} was placed for a {icon:?} map, not the {map:?} one")]
    IconMapMismatch {
        name: String,
        icon: (u32, u32),
        map: (u32, u32),
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Icon {name:?} got a non-finite {quantity}: {value}")]
    NonFinitePlacement {
        name: String,
        quantity: &'static str,
        value: f64,
    },

    #[error("No icon with index {0}")]
    UnknownIcon(usize),

    #[error("No icon named {0:?}")]
    UnknownIconName(String),

    #[error("Could not find an unused file name for {0:?}")]
    NoUniqueFilename(PathBuf),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
