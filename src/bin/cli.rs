use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use usersapi::{
    config::Config,
    db,
    models::{NewUser, User},
    repositories::{RepositoryError, SqliteUserRepository, UserRepository},
    validation::is_valid_email,
};

#[derive(Parser)]
#[command(name = "usersapi-cli")]
#[command(about = "CLI tool for managing users directly in the database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(short, long)]
        email: String,

        /// Use this id instead of a generated one
        #[arg(long)]
        id: Option<String>,
    },

    /// List all users
    List,

    /// Show a single user
    Get {
        #[arg(long)]
        id: String,
    },

    /// Delete a user
    Delete {
        #[arg(long)]
        id: String,
    },
}

fn print_user(user: &User) {
    println!("  ID:         {}", user.id);
    println!("  Name:       {} {}", user.first_name, user.last_name);
    println!("  Email:      {}", user.email);
    println!("  Created at: {}", user.created_at.to_rfc3339());
    println!("  Updated at: {}", user.updated_at.to_rfc3339());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to database
    let pool = db::create_pool(&config)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to create users table")?;

    let repository = SqliteUserRepository::new(pool);

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                first_name,
                last_name,
                email,
                id,
            } => {
                if first_name.trim().is_empty() || last_name.trim().is_empty() {
                    bail!("First and last name are required");
                }
                if !is_valid_email(&email) {
                    bail!("Invalid email address: {}", email);
                }

                let user = repository
                    .create(NewUser {
                        id,
                        first_name,
                        last_name,
                        email,
                    })
                    .await
                    .context("Failed to create user")?;

                println!("✅ User created successfully!");
                print_user(&user);
            }

            UserCommands::List => {
                let users = repository.get_all().await.context("Failed to list users")?;
                if users.is_empty() {
                    println!("No users found.");
                } else {
                    println!("{:<38} {:<30} {:<40}", "ID", "Name", "Email");
                    println!("{}", "-".repeat(108));
                    for user in users {
                        let name = format!("{} {}", user.first_name, user.last_name);
                        println!("{:<38} {:<30} {:<40}", user.id, name, user.email);
                    }
                }
            }

            UserCommands::Get { id } => match repository.get_by_id(&id).await {
                Ok(user) => print_user(&user),
                Err(RepositoryError::NotFound) => bail!("User '{}' not found", id),
                Err(e) => return Err(e).context("Failed to find user"),
            },

            UserCommands::Delete { id } => match repository.delete_by_id(&id).await {
                Ok(()) => println!("✅ User '{}' deleted successfully!", id),
                Err(RepositoryError::NotFound) => bail!("User '{}' not found", id),
                Err(e) => return Err(e).context("Failed to delete user"),
            },
        },
    }

    Ok(())
}
