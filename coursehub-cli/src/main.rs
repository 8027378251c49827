//! CourseHub CLI - operator tooling for the course catalog

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use coursehub_core::{
    can_delete_course, ActingIdentity, Course, CourseBackend, CourseHubConfig, JsonFileBackend,
    Role, UserDirectory,
};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "coursehub")]
#[command(about = "CourseHub - course catalog and moderation tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a course catalog file
    Validate {
        /// Catalog file path
        file: String,
    },

    /// List the courses in a catalog file
    Courses {
        /// Catalog file path
        #[arg(short, long, default_value = "courses.json")]
        file: String,

        /// Output format (json, text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the user directory
    Users {
        /// TOML configuration with a [[users]] table
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (json, text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check whether an actor may delete a course
    CanDelete {
        /// Catalog file path
        #[arg(short, long, default_value = "courses.json")]
        file: String,

        /// Course id
        #[arg(long)]
        course: i64,

        /// Acting user id
        #[arg(long)]
        user_id: Option<String>,

        /// Acting role (MEMBER, SUB_ADMIN, ADMIN)
        #[arg(long, default_value = "MEMBER")]
        role: String,

        /// TOML configuration with a [[users]] table
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("coursehub=debug")
            .init();
    }

    match cli.command {
        Commands::Validate { file } => validate_command(&file),
        Commands::Courses { file, format } => courses_command(&file, &format),
        Commands::Users { config, format } => users_command(config.as_deref(), &format),
        Commands::CanDelete {
            file,
            course,
            user_id,
            role,
            config,
        } => can_delete_command(&file, course, user_id, &role, config.as_deref()),
    }
}

fn load_catalog(file: &str) -> Result<Vec<Course>> {
    JsonFileBackend::new(file)
        .load()
        .with_context(|| format!("Failed to load catalog: {}", file))
}

fn load_directory(config: Option<&str>) -> Result<UserDirectory> {
    match config {
        Some(path) => {
            let config = CourseHubConfig::from_file(path)?;
            Ok(UserDirectory::from_seeds(&config.users))
        }
        None => Ok(UserDirectory::seeded()),
    }
}

fn validate_command(file: &str) -> Result<()> {
    println!("{} Validating {}...", "→".blue(), file);
    let start = Instant::now();

    let courses = match load_catalog(file) {
        Ok(courses) => courses,
        Err(e) => {
            println!("{} Catalog is invalid:", "✗".red());
            println!("  {:#}", e);
            std::process::exit(1);
        }
    };

    let mut seen: HashMap<i64, usize> = HashMap::new();
    for course in &courses {
        *seen.entry(course.id).or_default() += 1;
    }
    let mut duplicates: Vec<i64> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect();
    duplicates.sort_unstable();

    let directory = UserDirectory::seeded();
    let orphaned = courses
        .iter()
        .filter(|c| directory.find_by_id(&c.owner_id).is_none())
        .count();

    if !duplicates.is_empty() {
        println!("{} Duplicate course ids:", "✗".red());
        for id in &duplicates {
            println!("  {}", id);
        }
        std::process::exit(1);
    }

    println!("{} Catalog is valid!", "✓".green());
    println!("  Courses: {}", courses.len());
    if orphaned > 0 {
        println!(
            "  {} {} course(s) owned by unknown users (treated as MEMBER)",
            "!".yellow(),
            orphaned
        );
    }
    println!(
        "\n{} Total time: {:.3}ms",
        "✓".green(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

fn courses_command(file: &str, format: &str) -> Result<()> {
    let courses = load_catalog(file)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&courses)?),
        _ => {
            println!("\n{} Courses ({})", "═".blue().bold(), courses.len());
            for course in &courses {
                println!(
                    "{} [{}] {} {} {}",
                    "▸".blue(),
                    course.id,
                    course.title.bold(),
                    format!("({})", course.category).dimmed(),
                    format!("by {}", course.owner_username).dimmed()
                );
                println!("    {}", course.link);
            }
        }
    }

    Ok(())
}

fn users_command(config: Option<&str>, format: &str) -> Result<()> {
    let directory = load_directory(config)?;
    let users = directory.list();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&users)?),
        _ => {
            println!("\n{} Users ({})", "═".blue().bold(), users.len());
            for user in &users {
                let (email, _) = directory
                    .find_by_id(&user.id)
                    .context("Directory changed while listing")?;
                println!(
                    "{} {} {} {} {}",
                    "▸".blue(),
                    user.id,
                    user.username.bold(),
                    email.dimmed(),
                    role_label(user.role)
                );
            }
        }
    }

    Ok(())
}

fn can_delete_command(
    file: &str,
    course_id: i64,
    user_id: Option<String>,
    role: &str,
    config: Option<&str>,
) -> Result<()> {
    let role: Role = role.parse()?;
    let courses = load_catalog(file)?;
    let directory = load_directory(config)?;

    let Some(course) = courses.iter().find(|c| c.id == course_id) else {
        bail!("Course {} not found in {}", course_id, file);
    };

    let actor = ActingIdentity::from_claims(user_id, Some(role.as_str()));
    let owner_role = directory.role_of(&course.owner_id);
    let permitted = can_delete_course(&actor, course, owner_role);

    let status = if permitted {
        "PERMITTED".green()
    } else {
        "DENIED".red()
    };

    println!("\n{} Delete Check", "═".blue().bold());
    println!("{} Status: {}", "▸".blue(), status);
    println!("{} Course: {} ({})", "▸".blue(), course.id, course.title);
    println!(
        "{} Owner: {} ({})",
        "▸".blue(),
        course.owner_id,
        role_label(owner_role)
    );
    println!(
        "{} Actor: {} ({})",
        "▸".blue(),
        actor.user_id.as_deref().unwrap_or("-"),
        role_label(actor.role)
    );

    Ok(())
}

fn role_label(role: Role) -> ColoredString {
    match role {
        Role::Admin => role.as_str().red(),
        Role::SubAdmin => role.as_str().yellow(),
        Role::Member => role.as_str().normal(),
    }
}
