use chrono::Utc;
use tracing::info;

use tarushiru_core::ViewController;
use tarushiru_storage_file::{read_backup_file, write_backup_file};

use super::confirm;
use crate::opt::BackupCommand;

pub(crate) fn run(vc: &mut ViewController, cmd: BackupCommand) -> anyhow::Result<()> {
    match cmd {
        BackupCommand::Export { out } => {
            let Some(contents) = vc.store().export_backup()? else {
                println!("No data to export.");
                return Ok(());
            };
            let path = write_backup_file(&out, Utc::now().date_naive(), &contents)?;
            println!("Backup written to {}", path.display());
            Ok(())
        }
        BackupCommand::Import { file, confirm: c } => {
            let contents = read_backup_file(&file)?;
            if !confirm(
                "Importing replaces all current data. Continue?",
                c.yes,
            )? {
                println!("Cancelled.");
                return Ok(());
            }
            let data = vc.store_mut().import_backup(&contents)?;
            info!("Imported backup from {}", file.display());
            println!(
                "Imported {} entries, {} goals, {} asset records.",
                data.journal.len(),
                data.goals.len(),
                data.assets.len()
            );
            Ok(())
        }
    }
}

pub(crate) fn reset(vc: &mut ViewController, yes: bool) -> anyhow::Result<()> {
    if !confirm("Really delete all data?", yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    vc.reset_data()?;
    println!("All data deleted.");
    Ok(())
}
