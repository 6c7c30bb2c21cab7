//! services/dashboard/src/bin/dashboard.rs
//!
//! Thin command-line driver for the dashboard client: one invocation runs
//! one store operation and prints the resulting snapshot. The real view
//! layer is out of scope; this binary exists to exercise the stores against
//! a live API.

use std::path::Path;

use bytes::Bytes;
use chalkboard_core::domain::{Credentials, FilePart, NewCourse, NewVideo, RegisterProfile, VideoUpdate};
use dashboard_lib::{app::App, config::Config, error::AppError};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. API base: {}", config.api_base_url);

    // --- 2. Build the Stores ---
    let mut app = App::new(&config);

    // --- 3. Run One Command ---
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    match command {
        "login" => {
            let credentials = Credentials {
                email: arg(&args, 1, "email")?,
                password: arg(&args, 2, "password")?,
            };
            app.session.login(&credentials).await;
            report_session(&app);
        }
        "register" => {
            let profile = RegisterProfile {
                name: arg(&args, 1, "name")?,
                email: arg(&args, 2, "email")?,
                password: arg(&args, 3, "password")?,
                qualification: arg(&args, 4, "qualification")?,
                experience: arg(&args, 5, "experience")?,
                subject: arg(&args, 6, "subject")?,
                profile_picture: args.get(7).cloned(),
                ..RegisterProfile::default()
            };
            app.session.register(&profile).await;
            report_session(&app);
        }
        "profile" => {
            app.session.get_profile().await;
            report_session(&app);
        }
        "create-course" => {
            let course = NewCourse {
                title: arg(&args, 1, "title")?,
                description: arg(&args, 2, "description")?,
                cover_image: file_part(&arg(&args, 3, "cover image path")?)?,
            };
            app.session.create_course(course).await;
            match &app.session.state().lifecycle.error {
                Some(error) => eprintln!("error: {}", error),
                None => println!("Course created. Refetch playlists to see it."),
            }
        }
        "logout" => {
            app.session.logout();
            println!("Logged out.");
        }
        "playlists" => {
            app.playlists.fetch_all().await;
            report_playlists(app.playlists.state().all.iter());
            report_playlist_error(&app);
        }
        "playlist" => {
            app.playlists.fetch_by_id(&arg(&args, 1, "playlist id")?).await;
            if let Some(playlist) = &app.playlists.state().current {
                println!("{} - {}", playlist.id, playlist.title);
                for video in &playlist.videos {
                    println!("  {} - {}", video.id, video.title);
                }
            }
            report_playlist_error(&app);
        }
        "teacher-playlists" => {
            app.playlists
                .fetch_by_teacher(&arg(&args, 1, "teacher id")?)
                .await;
            report_playlists(app.playlists.state().by_teacher.iter());
            report_playlist_error(&app);
        }
        "delete-playlist" => {
            app.playlists.delete(&arg(&args, 1, "playlist id")?).await;
            report_playlist_error(&app);
        }
        "add-video" => {
            let video = NewVideo {
                title: arg(&args, 2, "title")?,
                description: arg(&args, 3, "description")?,
                video: file_part(&arg(&args, 4, "video path")?)?,
                thumbnail: file_part(&arg(&args, 5, "thumbnail path")?)?,
            };
            app.videos
                .add_to_playlist(&arg(&args, 1, "playlist id")?, video)
                .await;
            report_videos(&app);
        }
        "update-video" => {
            let update = VideoUpdate {
                title: args.get(2).cloned(),
                description: args.get(3).cloned(),
            };
            app.videos.update(&arg(&args, 1, "video id")?, &update).await;
            report_videos(&app);
        }
        "delete-video" => {
            app.videos.delete(&arg(&args, 1, "video id")?).await;
            report_videos(&app);
        }
        _ => {
            println!("usage: dashboard <command> [args]");
            println!("  login <email> <password>");
            println!("  register <name> <email> <password> <qualification> <experience> <subject> [picture-url]");
            println!("  profile");
            println!("  create-course <title> <description> <cover-image-path>");
            println!("  logout");
            println!("  playlists");
            println!("  playlist <id>");
            println!("  teacher-playlists <teacher-id>");
            println!("  delete-playlist <id>");
            println!("  add-video <playlist-id> <title> <description> <video-path> <thumbnail-path>");
            println!("  update-video <id> [title] [description]");
            println!("  delete-video <id>");
        }
    }

    Ok(())
}

fn arg(args: &[String], index: usize, name: &str) -> Result<String, AppError> {
    args.get(index)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("missing argument: {}", name)))
}

fn file_part(path: &str) -> Result<FilePart, AppError> {
    let data = std::fs::read(path)?;
    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    Ok(FilePart {
        file_name,
        content_type: None,
        data: Bytes::from(data),
    })
}

fn report_session(app: &App) {
    let state = app.session.state();
    if let Some(error) = &state.lifecycle.error {
        eprintln!("error: {}", error);
    } else if let Some(teacher) = &state.teacher {
        println!(
            "{} <{}> - {} playlist(s)",
            teacher.name,
            teacher.email,
            teacher.playlists.len()
        );
    }
}

fn report_playlists<'a>(playlists: impl Iterator<Item = &'a chalkboard_core::domain::Playlist>) {
    for playlist in playlists {
        println!("{} - {} ({} videos)", playlist.id, playlist.title, playlist.videos.len());
    }
}

fn report_playlist_error(app: &App) {
    if let Some(error) = &app.playlists.state().lifecycle.error {
        eprintln!("error: {}", error);
    }
}

fn report_videos(app: &App) {
    let state = app.videos.state();
    if let Some(error) = &state.lifecycle.error {
        eprintln!("error: {}", error);
    } else {
        for video in &state.videos {
            println!("{} - {}", video.id, video.title);
        }
    }
}
