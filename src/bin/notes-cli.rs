use clap::{Parser, Subcommand};
use serde::Serialize;

use notes_api::client::{ApiClient, ClientError};
use notes_api::folders::{CreateFolderRequest, UpdateFolderRequest};
use notes_api::notes::{CreateNoteRequest, UpdateNoteRequest};

#[derive(Parser)]
#[command(name = "notes-cli")]
#[command(about = "Command-line client for the folders and notes API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "NOTES_API_URL", default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage folders
    #[command(subcommand)]
    Folders(FolderCommand),
    /// Manage notes
    #[command(subcommand)]
    Notes(NoteCommand),
}

#[derive(Subcommand)]
enum FolderCommand {
    /// List all folders
    List,
    /// Show one folder
    Get { id: i64 },
    /// Create a folder
    Create {
        #[arg(long)]
        name: String,
    },
    /// Rename a folder
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete an empty folder
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum NoteCommand {
    /// List all notes
    List,
    /// Show one note
    Get { id: i64 },
    /// Create a note
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        folder_id: i64,
    },
    /// Change some fields of a note
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        folder_id: Option<i64>,
    },
    /// Delete a note
    Delete { id: i64 },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url);

    let result = match cli.command {
        Commands::Folders(command) => run_folders(&client, command).await,
        Commands::Notes(command) => run_notes(&client, command).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_folders(client: &ApiClient, command: FolderCommand) -> Result<(), CliError> {
    match command {
        FolderCommand::List => print_json(&client.list_folders().await?),
        FolderCommand::Get { id } => print_json(&client.get_folder(id).await?),
        FolderCommand::Create { name } => {
            let created = client
                .create_folder(&CreateFolderRequest { name: Some(name) })
                .await?;
            print_json(&created.body)
        }
        FolderCommand::Update { id, name } => {
            client
                .update_folder(id, &UpdateFolderRequest { name: Some(name) })
                .await?;
            println!("Folder {} updated", id);
            Ok(())
        }
        FolderCommand::Delete { id } => {
            client.delete_folder(id).await?;
            println!("Folder {} deleted", id);
            Ok(())
        }
    }
}

async fn run_notes(client: &ApiClient, command: NoteCommand) -> Result<(), CliError> {
    match command {
        NoteCommand::List => print_json(&client.list_notes().await?),
        NoteCommand::Get { id } => print_json(&client.get_note(id).await?),
        NoteCommand::Create {
            title,
            content,
            folder_id,
        } => {
            let created = client
                .create_note(&CreateNoteRequest {
                    title: Some(title),
                    content: Some(content),
                    folder_id: Some(folder_id),
                })
                .await?;
            print_json(&created.body)
        }
        NoteCommand::Update {
            id,
            title,
            content,
            folder_id,
        } => {
            client
                .update_note(
                    id,
                    &UpdateNoteRequest {
                        title,
                        content,
                        folder_id,
                    },
                )
                .await?;
            println!("Note {} updated", id);
            Ok(())
        }
        NoteCommand::Delete { id } => {
            client.delete_note(id).await?;
            println!("Note {} deleted", id);
            Ok(())
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
