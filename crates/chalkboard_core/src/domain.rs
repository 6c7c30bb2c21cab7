//! crates/chalkboard_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any wire or serialization format.

use bytes::Bytes;

/// A teacher account as the server reports it. Held by the session store
/// while authenticated; absent when logged out.
#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub qualification: String,
    pub experience: String,
    pub subject: String,
    pub playlists: Vec<Playlist>,
}

/// A course playlist with its embedded videos.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// What login and register hand back: the teacher record plus the bearer
/// token the server issues alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherSession {
    pub teacher: Teacher,
    pub token: String,
}

// Only used for login - contains sensitive data
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The full signup form. The profile picture URL is obtained out-of-band
/// (uploaded to the image host first) and submitted here as a plain string.
/// The three provider-account fields travel with the form but no OAuth flow
/// backs them.
#[derive(Debug, Clone, Default)]
pub struct RegisterProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    pub google_account: String,
    pub github_account: String,
    pub linkedin_account: String,
    pub qualification: String,
    pub experience: String,
    pub subject: String,
    pub profile_picture: Option<String>,
}

/// A file travelling inside a multipart submission.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Course-creation payload; submitted as a multipart form with the fields
/// `title`, `description`, and `coverImage`.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub cover_image: FilePart,
}

/// Video-upload payload; submitted as a multipart form with the fields
/// `title`, `description`, `video`, and `thumbnail`.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub video: FilePart,
    pub thumbnail: FilePart,
}

/// Fields a video update may replace. `None` fields are omitted from the
/// request body.
#[derive(Debug, Clone, Default)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}
