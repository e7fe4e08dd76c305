// src/main.rs
// Console client for the Kukekodes learning platform.

use dotenv::dotenv;
use std::env;
use tracing_subscriber::EnvFilter;

use kukekodes_client::common::config::apply_cli_override;
use kukekodes_client::courses::CourseQuery;
use kukekodes_client::learning::course_progress_percent;
use kukekodes_client::services::youtube::{format_duration, youtube_video_id};
use kukekodes_client::{ClientConfig, Kukekodes, SignupRequest};

fn command_args() -> Vec<String> {
    // Drop the binary name and the --api-url pair already handled by config.
    let mut args = Vec::new();
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--api-url" {
            iter.next();
        } else {
            args.push(arg);
        }
    }
    args
}

fn print_usage() {
    println!("Usage: kukekodes [--api-url <url>] <command>");
    println!();
    println!("Commands:");
    println!("  login <email> <password>");
    println!("  signup <email> <password> <first-name> <last-name> [country]");
    println!("  logout");
    println!("  whoami");
    println!("  courses [search]");
    println!("  course <id>");
    println!("  dashboard");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = apply_cli_override(ClientConfig::from_env());
    let client = Kukekodes::new(config);

    let args = command_args();
    match args.as_slice() {
        [cmd, email, password] if cmd == "login" => {
            let outcome = client.auth().login(email, password).await;
            if !outcome.success {
                anyhow::bail!(outcome.error.unwrap_or_else(|| "Login failed".to_string()));
            }
            let name = client
                .auth()
                .current_user()
                .map(|u| u.display_name())
                .unwrap_or_else(|| email.clone());
            println!("Logged in as {}", name);
        }
        [cmd, email, password, first_name, last_name, rest @ ..] if cmd == "signup" => {
            let request = SignupRequest {
                email: email.clone(),
                password: password.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                country: rest.first().cloned(),
            };
            let outcome = client.auth().signup(request).await;
            if !outcome.success {
                anyhow::bail!(outcome.error.unwrap_or_else(|| "Signup failed".to_string()));
            }
            println!("Account created. You are now logged in.");
        }
        [cmd] if cmd == "logout" => {
            client.auth().logout().await;
            println!("Logged out");
        }
        [cmd] if cmd == "whoami" => match client.auth().current_user() {
            Some(user) => println!("{} <{}> ({:?})", user.display_name(), user.email, user.role),
            None => println!("Not logged in"),
        },
        [cmd, rest @ ..] if cmd == "courses" => {
            let query = CourseQuery {
                search: rest.first().cloned(),
                ..Default::default()
            };
            let page = client.courses(&query).await?;
            println!(
                "{} courses (page {} of {})",
                page.meta.total, page.meta.page, page.meta.total_pages
            );
            for course in &page.data {
                println!(
                    "  [{}] {} ({}, {} lessons)",
                    course.id,
                    course.title,
                    course.level.as_str(),
                    course.lesson_count()
                );
            }
        }
        [cmd, id] if cmd == "course" => {
            let course = client.course(id).await?;
            println!("{} ({})", course.title, course.level.as_str());
            println!("{}", course.description);
            for module in &course.modules {
                println!("  {}. {}", module.order, module.title);
                for lesson in &module.lessons {
                    let video = youtube_video_id(&lesson.youtube_url)
                        .unwrap_or_else(|| "no video".to_string());
                    println!(
                        "    {}. {} [{}] ({})",
                        lesson.order,
                        lesson.title,
                        video,
                        format_duration(lesson.duration)
                    );
                }
            }
        }
        [cmd] if cmd == "dashboard" => {
            let dashboard = client.dashboard().await?;
            println!("Your courses:");
            for course in &dashboard.courses {
                let percent = course_progress_percent(course, &dashboard.progress);
                println!("  {}: {}% complete", course.title, percent);
            }
            if let Some(streak) = dashboard.streaks.first() {
                println!(
                    "Streak: {} days (best {})",
                    streak.current_days, streak.longest_days
                );
            }
        }
        _ => print_usage(),
    }

    Ok(())
}
