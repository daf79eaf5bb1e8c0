use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use blade_core::{
    DamageEdit, DamageOutcome, MaterialInput, NewDamage, QuickDamage, RepairLogInput, Tracker,
};
use blade_model::{BladeId, filter_blades, filter_turbines};
use blade_persistence::{FileStore, StoreConfig};

use crate::cli::{
    AddDamageArgs, Cli, Command, EditDamageArgs, ExportArgs, LogFields, MaterialArgs,
    MaterialsArgs, QuickAddArgs, SearchArgs,
};
use crate::summary::{blade_table, print_materials, print_selection, turbine_table};

pub type FileTracker = Tracker<FileStore>;

/// Open the tracker stored in the slot named by `--data-dir` and `--slot`.
pub fn open_tracker(data_dir: &Path, slot: &str) -> Result<FileTracker> {
    let config = StoreConfig::new(data_dir, slot);
    let path = config.slot_path();
    let tracker = Tracker::open(FileStore::new(&path))
        .with_context(|| format!("open tracker state at {}", path.display()))?;
    Ok(tracker)
}

pub fn run(cli: &Cli) -> Result<()> {
    let mut tracker = open_tracker(&cli.data_dir, &cli.slot)?;
    match &cli.command {
        Command::Show => {
            print_selection(&tracker.selected());
            Ok(())
        }
        Command::Turbines(args) => {
            run_turbines(&tracker, args);
            Ok(())
        }
        Command::Blades(args) => {
            run_blades(&tracker, args);
            Ok(())
        }
        Command::SelectTurbine { turbine_id } => {
            tracker.select_turbine(*turbine_id)?;
            print_selection(&tracker.selected());
            Ok(())
        }
        Command::SelectBlade { blade_id } => {
            tracker.select_blade(BladeId::from(blade_id.as_str()))?;
            print_selection(&tracker.selected());
            Ok(())
        }
        Command::Jump {
            turbine_id,
            blade_id,
        } => {
            tracker.jump_to(*turbine_id, BladeId::from(blade_id.as_str()))?;
            print_selection(&tracker.selected());
            Ok(())
        }
        Command::AddDamage(args) => run_add_damage(&mut tracker, args),
        Command::QuickAdd(args) => run_quick_add(&mut tracker, args),
        Command::ToggleStatus { damage_id } => {
            let status = tracker.toggle_damage_status(*damage_id)?;
            println!("Damage {damage_id} is now {}", status.label());
            Ok(())
        }
        Command::EditDamage(args) => run_edit_damage(&mut tracker, args),
        Command::AddMaterial(args) => {
            tracker.add_material(
                args.damage_id,
                MaterialInput::new(args.name.as_str(), args.qty, args.unit.as_str()),
            )?;
            println!("Added {} {} {} to damage {}", args.qty, args.unit, args.name, args.damage_id);
            Ok(())
        }
        Command::RemoveMaterial(args) => run_remove_material(&mut tracker, args),
        Command::AddLog(args) => {
            let log_id = tracker.add_repair_log(args.damage_id, log_input(&args.fields))?;
            println!("Added repair log {log_id} to damage {}", args.damage_id);
            Ok(())
        }
        Command::EditLog(args) => {
            tracker.edit_repair_log(args.damage_id, args.log_id, log_input(&args.fields))?;
            println!("Updated repair log {}", args.log_id);
            Ok(())
        }
        Command::RemoveLog { damage_id, log_id } => {
            tracker.remove_repair_log(*damage_id, *log_id)?;
            println!("Removed repair log {log_id} from damage {damage_id}");
            Ok(())
        }
        Command::Materials(args) => {
            run_materials(&tracker, args);
            Ok(())
        }
        Command::ExportCsv(args) => run_export(&tracker, args),
    }
}

fn run_turbines(tracker: &FileTracker, args: &SearchArgs) {
    let state = tracker.state();
    let turbines = filter_turbines(&state.turbines, args.search.as_deref().unwrap_or_default());
    if turbines.is_empty() {
        println!("No turbines found.");
        return;
    }
    println!("{}", turbine_table(&turbines, state.selected_turbine_id));
}

fn run_blades(tracker: &FileTracker, args: &SearchArgs) {
    let state = tracker.state();
    let Some(turbine) = tracker.selected().turbine else {
        println!("Select a turbine first");
        return;
    };
    let blades = filter_blades(&turbine.blades, args.search.as_deref().unwrap_or_default());
    if blades.is_empty() {
        println!("No blades found.");
        return;
    }
    let selected = state.selected_blade_id.as_ref().map(BladeId::as_str);
    println!("{}", blade_table(&blades, selected));
}

fn run_add_damage(tracker: &mut FileTracker, args: &AddDamageArgs) -> Result<()> {
    let outcome = tracker.add_or_update_damage(NewDamage {
        damage_id: args.damage_id,
        turbine_id: args.turbine_id,
        turbine_serial_no: args.turbine_serial_no.clone(),
        blade_serial_no: args.blade_serial_no.clone(),
        category: args.category.clone(),
        description: args.description.clone(),
        radius: args.radius,
        side: args.side.clone(),
    })?;
    match outcome {
        DamageOutcome::TurbineCreated {
            turbine_id,
            blade_id,
        } => {
            println!(
                "Created turbine {turbine_id} with blade {blade_id}. \
                 Run the command again to record damage {}.",
                args.damage_id
            );
        }
        DamageOutcome::DamageAdded {
            damage_id,
            blade_id,
            blade_created,
        } => {
            if blade_created {
                println!("Created blade {blade_id}");
            }
            println!("Added damage {damage_id} to blade {blade_id}");
        }
    }
    Ok(())
}

fn run_quick_add(tracker: &mut FileTracker, args: &QuickAddArgs) -> Result<()> {
    let damage_id = tracker.quick_add_damage(QuickDamage {
        category: args.category.clone(),
        description: args.description.clone(),
        radius: args.radius,
        side: args.side.clone(),
    })?;
    println!("Added damage {damage_id}");
    Ok(())
}

fn run_edit_damage(tracker: &mut FileTracker, args: &EditDamageArgs) -> Result<()> {
    let edit = DamageEdit {
        id: args.new_id,
        category: args.category.clone(),
        status: args.status,
        description: args.description.clone(),
        radius: args.radius,
        side: args.side.clone(),
    };
    if edit == DamageEdit::default() {
        println!("Nothing to change");
        return Ok(());
    }
    tracker.edit_damage(args.damage_id, edit)?;
    println!("Updated damage {}", args.new_id.unwrap_or(args.damage_id));
    Ok(())
}

fn run_remove_material(tracker: &mut FileTracker, args: &MaterialArgs) -> Result<()> {
    let removed = tracker.remove_material(args.damage_id, &args.name, args.qty, &args.unit)?;
    println!(
        "Removed {} {} {} from damage {}",
        removed.qty, removed.unit, removed.name, args.damage_id
    );
    Ok(())
}

fn run_materials(tracker: &FileTracker, args: &MaterialsArgs) {
    let groups = tracker.materials_summary(args.status);
    info!(groups = groups.len(), "Built materials summary");
    print_materials(&groups, args.entries);
}

fn run_export(tracker: &FileTracker, args: &ExportArgs) -> Result<()> {
    let blade_id = args.blade_id.as_deref().map(BladeId::from);
    let csv = tracker.export_blade_csv(blade_id.as_ref())?;
    fs::write(&args.output, csv)
        .with_context(|| format!("write {}", args.output.display()))?;
    println!("Exported materials to {}", args.output.display());
    Ok(())
}

fn log_input(fields: &LogFields) -> RepairLogInput {
    RepairLogInput {
        date: fields.date,
        hours: fields.hours,
        weather: fields.weather,
        description: fields.description.clone(),
    }
}
