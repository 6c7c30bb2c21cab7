//! services/dashboard/tests/gateway.rs
//!
//! Full HTTP roundtrip tests: the real `HttpGatewayAdapter` driven against
//! an in-process axum stub of the dashboard REST API.

use axum::extract::{Multipart, Path};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use bytes::Bytes;
use chalkboard_core::domain::{
    Credentials, FilePart, NewCourse, NewVideo, RegisterProfile, VideoUpdate,
};
use chalkboard_core::ports::{ApiGateway, PortError};
use dashboard_lib::adapters::HttpGatewayAdapter;
use serde_json::{json, Value};

/// Binds the stub API on an ephemeral port and returns an adapter rooted at
/// its `/api` prefix.
async fn serve(router: Router) -> HttpGatewayAdapter {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    HttpGatewayAdapter::new(reqwest::Client::new(), format!("http://{}/api", addr))
}

fn sample_file(name: &str) -> FilePart {
    FilePart {
        file_name: name.to_string(),
        content_type: Some("application/octet-stream".to_string()),
        data: Bytes::from_static(b"payload"),
    }
}

//=========================================================================================
// Auth Endpoints
//=========================================================================================

#[tokio::test]
async fn login_decodes_teacher_and_token() {
    let router = Router::new().route(
        "/api/teachers/login",
        post(|Json(body): Json<Value>| async move {
            if body["email"] != "ann@example.com" || body["password"] != "pw" {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"message": "Invalid email or password"})),
                )
                    .into_response();
            }
            Json(json!({
                "token": "abc",
                "_id": "1",
                "name": "Ann",
                "email": "ann@example.com",
                "playlists": []
            }))
            .into_response()
        }),
    );
    let gateway = serve(router).await;

    let session = gateway
        .login(&Credentials {
            email: "ann@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(session.token, "abc");
    assert_eq!(session.teacher.id, "1");
    assert_eq!(session.teacher.name, "Ann");
    assert!(session.teacher.playlists.is_empty());
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_message() {
    let router = Router::new().route(
        "/api/teachers/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid email or password"})),
            )
        }),
    );
    let gateway = serve(router).await;

    let error = gateway
        .login(&Credentials {
            email: "ann@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        error,
        PortError::Rejected {
            message: Some("Invalid email or password".to_string())
        }
    );
}

#[tokio::test]
async fn rejection_without_error_envelope_yields_no_message() {
    let router = Router::new().route(
        "/api/teachers/login",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
    );
    let gateway = serve(router).await;

    let error = gateway
        .login(&Credentials {
            email: "ann@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error, PortError::Rejected { message: None });
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let gateway = HttpGatewayAdapter::new(reqwest::Client::new(), "http://127.0.0.1:1/api");

    let error = gateway.fetch_all_playlists().await.unwrap_err();
    assert!(matches!(error, PortError::Network(_)));
}

#[tokio::test]
async fn register_sends_the_camel_case_signup_form() {
    let router = Router::new().route(
        "/api/teachers/register",
        post(|Json(body): Json<Value>| async move {
            let form_ok = body["name"] == "Ben"
                && body["googleAccount"] == ""
                && body["qualification"] == "MSc"
                // A profile picture was not supplied, so the key is absent.
                && body.get("profilePicture").is_none();
            if !form_ok {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "Malformed signup form"})),
                )
                    .into_response();
            }
            Json(json!({"token": "fresh", "_id": "t7", "name": "Ben"})).into_response()
        }),
    );
    let gateway = serve(router).await;

    let session = gateway
        .register(&RegisterProfile {
            name: "Ben".to_string(),
            email: "ben@example.com".to_string(),
            password: "pw".to_string(),
            qualification: "MSc".to_string(),
            ..RegisterProfile::default()
        })
        .await
        .unwrap();

    assert_eq!(session.token, "fresh");
    assert_eq!(session.teacher.id, "t7");
}

#[tokio::test]
async fn fetch_profile_attaches_the_bearer_token() {
    let router = Router::new().route(
        "/api/teachers/getTeacher",
        get(|headers: HeaderMap| async move {
            let authorized = headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                == Some("Bearer abc");
            if !authorized {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"message": "No token provided"})),
                )
                    .into_response();
            }
            Json(json!({"_id": "1", "name": "Ann", "subject": "Maths"})).into_response()
        }),
    );
    let gateway = serve(router).await;

    let teacher = gateway.fetch_profile("abc").await.unwrap();
    assert_eq!(teacher.id, "1");
    assert_eq!(teacher.subject, "Maths");

    let error = gateway.fetch_profile("stale").await.unwrap_err();
    assert_eq!(
        error,
        PortError::Rejected {
            message: Some("No token provided".to_string())
        }
    );
}

async fn stub_course_endpoint(headers: HeaderMap, mut multipart: Multipart) -> impl IntoResponse {
    if headers.get("authorization").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "No token provided"})),
        );
    }

    let mut names = Vec::new();
    let mut cover_file = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "coverImage" {
            cover_file = field.file_name().map(|file_name| file_name.to_string());
        }
        names.push(name);
    }

    if names != ["title", "description", "coverImage"] || cover_file.as_deref() != Some("cover.png")
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Malformed course form"})),
        );
    }
    (StatusCode::CREATED, Json(json!({"message": "created"})))
}

#[tokio::test]
async fn create_course_submits_multipart_with_bearer_token() {
    let router = Router::new().route("/api/teachers/course", post(stub_course_endpoint));
    let gateway = serve(router).await;

    let course = NewCourse {
        title: "Algebra".to_string(),
        description: "Linear equations".to_string(),
        cover_image: sample_file("cover.png"),
    };
    gateway
        .create_course(Some("abc".to_string()), course)
        .await
        .unwrap();
}

#[tokio::test]
async fn create_course_without_token_is_rejected_by_the_server() {
    let router = Router::new().route("/api/teachers/course", post(stub_course_endpoint));
    let gateway = serve(router).await;

    let course = NewCourse {
        title: "Algebra".to_string(),
        description: "Linear equations".to_string(),
        cover_image: sample_file("cover.png"),
    };
    let error = gateway.create_course(None, course).await.unwrap_err();
    assert_eq!(
        error,
        PortError::Rejected {
            message: Some("No token provided".to_string())
        }
    );
}

//=========================================================================================
// Playlist Endpoints
//=========================================================================================

#[tokio::test]
async fn fetch_all_playlists_decodes_the_envelope() {
    let router = Router::new().route(
        "/api/playList",
        get(|| async {
            Json(json!({
                "playlists": [{
                    "_id": "p1",
                    "title": "Algebra",
                    "description": "A first course",
                    "coverImage": "cover.png",
                    "videos": [{
                        "_id": "v1",
                        "title": "Intro",
                        "videoUrl": "http://cdn/intro.mp4",
                        "thumbnailUrl": "http://cdn/intro.png"
                    }]
                }]
            }))
        }),
    );
    let gateway = serve(router).await;

    let playlists = gateway.fetch_all_playlists().await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].id, "p1");
    assert_eq!(playlists[0].cover_image.as_deref(), Some("cover.png"));
    assert_eq!(playlists[0].videos[0].video_url.as_deref(), Some("http://cdn/intro.mp4"));
    // Fields the server omitted decode to their defaults.
    assert_eq!(playlists[0].videos[0].description, "");
}

#[tokio::test]
async fn fetch_playlist_hits_the_id_path() {
    let router = Router::new().route(
        "/api/playList/{id}",
        get(|Path(id): Path<String>| async move {
            Json(json!({"playlist": {"_id": id, "title": "Algebra"}}))
        }),
    );
    let gateway = serve(router).await;

    let playlist = gateway.fetch_playlist("p42").await.unwrap();
    assert_eq!(playlist.id, "p42");
    assert_eq!(playlist.title, "Algebra");
}

#[tokio::test]
async fn fetch_teacher_playlists_hits_the_teacher_path() {
    let router = Router::new().route(
        "/api/playList/teacher/{teacher_id}",
        get(|Path(teacher_id): Path<String>| async move {
            if teacher_id != "t1" {
                return (
                    StatusCode::NOT_FOUND,
                    Json(json!({"message": "Teacher not found"})),
                )
                    .into_response();
            }
            Json(json!({"playlists": [{"_id": "p1", "title": "Algebra", "videos": []}]}))
                .into_response()
        }),
    );
    let gateway = serve(router).await;

    let playlists = gateway.fetch_teacher_playlists("t1").await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].title, "Algebra");
}

#[tokio::test]
async fn delete_playlist_hits_the_id_path() {
    let router = Router::new().route(
        "/api/playList/{id}",
        delete(|Path(id): Path<String>| async move {
            if id != "p1" {
                return (
                    StatusCode::NOT_FOUND,
                    Json(json!({"message": "Playlist not found"})),
                );
            }
            (StatusCode::OK, Json(json!({"message": "Playlist deleted"})))
        }),
    );
    let gateway = serve(router).await;

    gateway.delete_playlist("p1").await.unwrap();

    let error = gateway.delete_playlist("p9").await.unwrap_err();
    assert_eq!(
        error,
        PortError::Rejected {
            message: Some("Playlist not found".to_string())
        }
    );
}

//=========================================================================================
// Video Endpoints
//=========================================================================================

async fn stub_video_upload(
    Path(playlist_id): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut names = Vec::new();
    let mut title = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let data = field.bytes().await.unwrap();
        if name == "title" {
            title = String::from_utf8(data.to_vec()).unwrap();
        }
        names.push(name);
    }

    if playlist_id != "p1" || names != ["title", "description", "video", "thumbnail"] {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Malformed video form"})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({"video": {"_id": "v9", "title": title}})),
    )
}

#[tokio::test]
async fn add_video_submits_the_expected_multipart_fields() {
    let router = Router::new().route("/api/Videos/{playlist_id}", post(stub_video_upload));
    let gateway = serve(router).await;

    let video = gateway
        .add_video(
            "p1",
            NewVideo {
                title: "X".to_string(),
                description: "First lesson".to_string(),
                video: sample_file("lesson.mp4"),
                thumbnail: sample_file("thumb.png"),
            },
        )
        .await
        .unwrap();

    assert_eq!(video.id, "v9");
    assert_eq!(video.title, "X");
}

#[tokio::test]
async fn update_video_sends_json_and_omits_absent_fields() {
    let router = Router::new().route(
        "/api/Videos/{id}",
        put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
            // Only the supplied fields may appear in the update body.
            if body.get("description").is_some() {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "Unexpected field"})),
                )
                    .into_response();
            }
            Json(json!({"video": {"_id": id, "title": body["title"]}})).into_response()
        }),
    );
    let gateway = serve(router).await;

    let video = gateway
        .update_video(
            "v2",
            &VideoUpdate {
                title: Some("Renamed".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(video.id, "v2");
    assert_eq!(video.title, "Renamed");
}

#[tokio::test]
async fn delete_video_hits_the_id_path() {
    let router = Router::new().route(
        "/api/Videos/{id}",
        delete(|Path(id): Path<String>| async move {
            if id != "v1" {
                return (
                    StatusCode::NOT_FOUND,
                    Json(json!({"message": "Video not found"})),
                );
            }
            (StatusCode::OK, Json(json!({"message": "Video deleted"})))
        }),
    );
    let gateway = serve(router).await;

    gateway.delete_video("v1").await.unwrap();
}
