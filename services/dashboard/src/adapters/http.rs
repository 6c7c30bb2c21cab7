//! services/dashboard/src/adapters/http.rs
//!
//! This module contains the REST gateway adapter, the concrete implementation
//! of the `ApiGateway` port from the `core` crate. It issues single-attempt
//! HTTP calls with `reqwest` and normalizes every failure into a `PortError`.

use async_trait::async_trait;
use chalkboard_core::domain::{
    Credentials, FilePart, NewCourse, NewVideo, Playlist, RegisterProfile, Teacher,
    TeacherSession, Video, VideoUpdate,
};
use chalkboard_core::ports::{ApiGateway, PortError, PortResult};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A REST adapter that implements the `ApiGateway` port.
#[derive(Clone)]
pub struct HttpGatewayAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGatewayAdapter {
    /// Creates a new `HttpGatewayAdapter` rooted at `base_url`
    /// (e.g. `http://localhost:5000/api`).
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Single-attempt send: no retries, no timeouts, no backoff. A call that
    /// never produces a response is a `Network` error; a non-success status
    /// is a `Rejected` carrying the server's `message` field when the error
    /// body yields one.
    async fn send(&self, request: RequestBuilder) -> PortResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .and_then(|envelope| envelope.message);
        warn!("Request rejected with status {}: {:?}", status, message);
        Err(PortError::Rejected { message })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> PortResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Network(e.to_string()))
    }

    fn file_part(file: &FilePart) -> PortResult<Part> {
        let mut part = Part::bytes(file.data.to_vec()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| PortError::Network(e.to_string()))?;
        }
        Ok(part)
    }
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
}
impl VideoRecord {
    fn to_domain(self) -> Video {
        Video {
            id: self.id,
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cover_image: Option<String>,
    #[serde(default)]
    videos: Vec<VideoRecord>,
}
impl PlaylistRecord {
    fn to_domain(self) -> Playlist {
        Playlist {
            id: self.id,
            title: self.title,
            description: self.description,
            cover_image: self.cover_image,
            videos: self.videos.into_iter().map(VideoRecord::to_domain).collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeacherRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    profile_picture: Option<String>,
    #[serde(default)]
    qualification: String,
    #[serde(default)]
    experience: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    playlists: Vec<PlaylistRecord>,
}
impl TeacherRecord {
    fn to_domain(self) -> Teacher {
        Teacher {
            id: self.id,
            name: self.name,
            email: self.email,
            profile_picture: self.profile_picture,
            qualification: self.qualification,
            experience: self.experience,
            subject: self.subject,
            playlists: self
                .playlists
                .into_iter()
                .map(PlaylistRecord::to_domain)
                .collect(),
        }
    }
}

/// Login and register respond with the teacher record and the token side by
/// side at top level.
#[derive(Deserialize)]
struct AuthRecord {
    token: String,
    #[serde(flatten)]
    teacher: TeacherRecord,
}
impl AuthRecord {
    fn to_domain(self) -> TeacherSession {
        TeacherSession {
            teacher: self.teacher.to_domain(),
            token: self.token,
        }
    }
}

#[derive(Deserialize)]
struct PlaylistsEnvelope {
    playlists: Vec<PlaylistRecord>,
}

#[derive(Deserialize)]
struct PlaylistEnvelope {
    playlist: PlaylistRecord,
}

#[derive(Deserialize)]
struct VideoEnvelope {
    video: VideoRecord,
}

//=========================================================================================
// Outgoing Request Bodies
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    google_account: &'a str,
    github_account: &'a str,
    linkedin_account: &'a str,
    qualification: &'a str,
    experience: &'a str,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_picture: Option<&'a str>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct VideoUpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

//=========================================================================================
// `ApiGateway` Trait Implementation
//=========================================================================================

#[async_trait]
impl ApiGateway for HttpGatewayAdapter {
    async fn register(&self, profile: &RegisterProfile) -> PortResult<TeacherSession> {
        let body = RegisterBody {
            name: &profile.name,
            email: &profile.email,
            password: &profile.password,
            google_account: &profile.google_account,
            github_account: &profile.github_account,
            linkedin_account: &profile.linkedin_account,
            qualification: &profile.qualification,
            experience: &profile.experience,
            subject: &profile.subject,
            profile_picture: profile.profile_picture.as_deref(),
        };
        let response = self
            .send(
                self.client
                    .post(self.endpoint("/teachers/register"))
                    .json(&body),
            )
            .await?;
        Ok(Self::decode::<AuthRecord>(response).await?.to_domain())
    }

    async fn login(&self, credentials: &Credentials) -> PortResult<TeacherSession> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self
            .send(
                self.client
                    .post(self.endpoint("/teachers/login"))
                    .json(&body),
            )
            .await?;
        Ok(Self::decode::<AuthRecord>(response).await?.to_domain())
    }

    async fn fetch_profile(&self, token: &str) -> PortResult<Teacher> {
        let response = self
            .send(
                self.client
                    .get(self.endpoint("/teachers/getTeacher"))
                    .bearer_auth(token),
            )
            .await?;
        Ok(Self::decode::<TeacherRecord>(response).await?.to_domain())
    }

    async fn create_course(&self, token: Option<String>, course: NewCourse) -> PortResult<()> {
        let form = Form::new()
            .text("title", course.title)
            .text("description", course.description)
            .part("coverImage", Self::file_part(&course.cover_image)?);

        let mut request = self
            .client
            .post(self.endpoint("/teachers/course"))
            .multipart(form);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.send(request).await?;
        Ok(())
    }

    async fn fetch_all_playlists(&self) -> PortResult<Vec<Playlist>> {
        let response = self.send(self.client.get(self.endpoint("/playList"))).await?;
        let envelope: PlaylistsEnvelope = Self::decode(response).await?;
        Ok(envelope
            .playlists
            .into_iter()
            .map(PlaylistRecord::to_domain)
            .collect())
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> PortResult<Playlist> {
        let response = self
            .send(
                self.client
                    .get(self.endpoint(&format!("/playList/{}", playlist_id))),
            )
            .await?;
        Ok(Self::decode::<PlaylistEnvelope>(response)
            .await?
            .playlist
            .to_domain())
    }

    async fn fetch_teacher_playlists(&self, teacher_id: &str) -> PortResult<Vec<Playlist>> {
        let response = self
            .send(
                self.client
                    .get(self.endpoint(&format!("/playList/teacher/{}", teacher_id))),
            )
            .await?;
        let envelope: PlaylistsEnvelope = Self::decode(response).await?;
        Ok(envelope
            .playlists
            .into_iter()
            .map(PlaylistRecord::to_domain)
            .collect())
    }

    async fn delete_playlist(&self, playlist_id: &str) -> PortResult<()> {
        self.send(
            self.client
                .delete(self.endpoint(&format!("/playList/{}", playlist_id))),
        )
        .await?;
        Ok(())
    }

    async fn add_video(&self, playlist_id: &str, video: NewVideo) -> PortResult<Video> {
        let form = Form::new()
            .text("title", video.title)
            .text("description", video.description)
            .part("video", Self::file_part(&video.video)?)
            .part("thumbnail", Self::file_part(&video.thumbnail)?);

        let response = self
            .send(
                self.client
                    .post(self.endpoint(&format!("/Videos/{}", playlist_id)))
                    .multipart(form),
            )
            .await?;
        Ok(Self::decode::<VideoEnvelope>(response)
            .await?
            .video
            .to_domain())
    }

    async fn update_video(&self, video_id: &str, update: &VideoUpdate) -> PortResult<Video> {
        let body = VideoUpdateBody {
            title: update.title.as_deref(),
            description: update.description.as_deref(),
        };
        let response = self
            .send(
                self.client
                    .put(self.endpoint(&format!("/Videos/{}", video_id)))
                    .json(&body),
            )
            .await?;
        Ok(Self::decode::<VideoEnvelope>(response)
            .await?
            .video
            .to_domain())
    }

    async fn delete_video(&self, video_id: &str) -> PortResult<()> {
        self.send(
            self.client
                .delete(self.endpoint(&format!("/Videos/{}", video_id))),
        )
        .await?;
        Ok(())
    }
}
