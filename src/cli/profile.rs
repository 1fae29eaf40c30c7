use anyhow::{Context, Result};
use clap::Subcommand;

use super::Session;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    #[command(about = "Print the display name and whether an avatar is set")]
    Show,
    #[command(about = "Change the display name and optionally the avatar")]
    Set {
        #[arg(long)]
        name: String,
        #[arg(
            long,
            help = "Avatar as a data URI, e.g. data:image/png;base64,... Keeps the current avatar when absent"
        )]
        avatar: Option<String>,
    },
}

pub async fn process_profile_command(session: &Session, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            let profile = session.profile.load().await?;
            if profile.display_name.is_empty() {
                println!("No display name");
            } else {
                println!("{}", profile.display_name);
            }
            match profile.avatar {
                Some(avatar) => println!("Avatar: {} characters", avatar.len()),
                None => println!("No avatar"),
            }
        }
        ProfileCommand::Set { name, avatar } => {
            session
                .profile
                .save(&name, avatar.as_deref().unwrap_or_default())
                .await
                .context("Failed to save profile")?;
            println!("Profile saved");
        }
    }
    Ok(())
}
