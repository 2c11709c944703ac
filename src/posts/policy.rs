use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

use crate::posts::repo_types::MediaType;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];
pub const ALLOWED_VIDEO_TYPES: &[&str] = &[
    "video/mp4",
    "video/mpeg",
    "video/quicktime",
    "video/x-msvideo",
];

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Unsupported media category: {0}")]
    UnknownCategory(String),

    #[error("Invalid {media} content type: {content_type}")]
    DisallowedContentType {
        media: MediaType,
        content_type: String,
    },

    #[error("{media} too large (max {limit_mib} MiB)")]
    TooLarge { media: MediaType, limit_mib: usize },
}

impl FromStr for MediaType {
    type Err = UploadRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(UploadRejection::UnknownCategory(other.to_string())),
        }
    }
}

pub fn validate(
    media: MediaType,
    content_type: &str,
    byte_len: usize,
) -> Result<(), UploadRejection> {
    let (allowed, max_bytes, limit_mib) = match media {
        MediaType::Image => (ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES, 10),
        MediaType::Video => (ALLOWED_VIDEO_TYPES, MAX_VIDEO_BYTES, 100),
    };

    if !allowed.contains(&content_type) {
        return Err(UploadRejection::DisallowedContentType {
            media,
            content_type: content_type.to_string(),
        });
    }
    if byte_len > max_bytes {
        return Err(UploadRejection::TooLarge { media, limit_mib });
    }
    Ok(())
}

/// Key shape: `{category}s/{user_id}/{uuid}.{ext}`. The fresh UUID makes
/// concurrent uploads collision-free; content is never consulted, so the key
/// is available before the upload body is read.
pub fn storage_key(media: MediaType, user_id: i64, original_filename: &str) -> String {
    let ext = extension_of(original_filename).unwrap_or("bin");
    format!("{}s/{}/{}.{}", media, user_id, Uuid::new_v4(), ext)
}

fn extension_of(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_within_limit() {
        assert_eq!(validate(MediaType::Image, "image/png", 5_000_000), Ok(()));
    }

    #[test]
    fn rejects_oversized_image() {
        let err = validate(MediaType::Image, "image/png", 11 * 1024 * 1024).unwrap_err();
        assert_eq!(
            err,
            UploadRejection::TooLarge {
                media: MediaType::Image,
                limit_mib: 10
            }
        );
    }

    #[test]
    fn rejects_wrong_content_type() {
        let err = validate(MediaType::Image, "application/pdf", 100).unwrap_err();
        assert_eq!(
            err,
            UploadRejection::DisallowedContentType {
                media: MediaType::Image,
                content_type: "application/pdf".into()
            }
        );
    }

    #[test]
    fn accepts_video_within_limit() {
        assert_eq!(
            validate(MediaType::Video, "video/mp4", 50 * 1024 * 1024),
            Ok(())
        );
    }

    #[test]
    fn image_limit_does_not_apply_to_video() {
        assert_eq!(
            validate(MediaType::Video, "video/quicktime", 99 * 1024 * 1024),
            Ok(())
        );
        assert!(validate(MediaType::Video, "video/mp4", 101 * 1024 * 1024).is_err());
    }

    #[test]
    fn size_limits_are_inclusive() {
        assert_eq!(validate(MediaType::Image, "image/gif", MAX_IMAGE_BYTES), Ok(()));
        assert!(validate(MediaType::Image, "image/gif", MAX_IMAGE_BYTES + 1).is_err());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "audio".parse::<MediaType>().unwrap_err();
        assert_eq!(err, UploadRejection::UnknownCategory("audio".into()));
        assert_eq!("image".parse::<MediaType>(), Ok(MediaType::Image));
        assert_eq!("video".parse::<MediaType>(), Ok(MediaType::Video));
    }

    #[test]
    fn storage_key_shape() {
        let key = storage_key(MediaType::Image, 42, "cat.png");
        let mut segments = key.split('/');
        assert_eq!(segments.next(), Some("images"));
        assert_eq!(segments.next(), Some("42"));
        let file = segments.next().expect("file segment");
        assert!(segments.next().is_none());

        let (stem, ext) = file.rsplit_once('.').expect("extension");
        assert_eq!(ext, "png");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn storage_keys_never_collide() {
        let a = storage_key(MediaType::Video, 7, "clip.mp4");
        let b = storage_key(MediaType::Video, 7, "clip.mp4");
        assert_ne!(a, b);
        assert!(a.starts_with("videos/7/"));
    }

    #[test]
    fn extensionless_filename_falls_back_to_bin() {
        let key = storage_key(MediaType::Image, 1, "noextension");
        assert!(key.ends_with(".bin"));
        let key = storage_key(MediaType::Image, 1, "trailingdot.");
        assert!(key.ends_with(".bin"));
        let key = storage_key(MediaType::Image, 1, "");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn extension_takes_last_suffix() {
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of(".env"), Some("env"));
        assert_eq!(extension_of("plain"), None);
    }
}
