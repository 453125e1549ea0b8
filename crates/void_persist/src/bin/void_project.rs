//! Project inspector
//!
//! Prints what the editor would see when opening a project directory,
//! including every integrity problem found while loading.
//!
//! Run with: cargo run -p void_persist --bin void_project -- <project dir>
//!       or: cargo run -p void_persist --bin void_project -- --registry

use std::path::PathBuf;
use std::process::ExitCode;

use void_persist::{PersistConfig, PersistenceManager, RotationMode};
use void_scene::{Project, Registry};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = PersistConfig::from_env();
    let mut show_registry = false;
    let mut project_dir: Option<PathBuf> = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--registry" => show_registry = true,
            "--quaternion" => config.rotation = RotationMode::QuaternionXyz,
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            flag if flag.starts_with("--") => {
                log::warn!("Unknown flag: {}", flag);
            }
            path => {
                if project_dir.is_none() {
                    project_dir = Some(PathBuf::from(path));
                }
            }
        }
    }

    let manager = PersistenceManager::new(config);

    if show_registry {
        print_registry(&manager.load_registry());
    }

    let Some(dir) = project_dir else {
        if !show_registry {
            print_usage();
        }
        return ExitCode::SUCCESS;
    };

    match manager.load_project(&dir) {
        Ok(resolution) => {
            print_project(&resolution.value);
            if resolution.is_clean() {
                println!("No integrity problems.");
                ExitCode::SUCCESS
            } else {
                println!("Integrity problems:");
                for diagnostic in &resolution.diagnostics {
                    println!("  - {}", diagnostic);
                }
                ExitCode::from(2)
            }
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Usage: void_project [--registry] [--quaternion] [PROJECT_DIR]");
    println!();
    println!("  --registry     print the global project registry");
    println!("  --quaternion   rebuild stored orientations as quaternions");
}

fn print_registry(registry: &Registry) {
    println!("Registry ({} projects)", registry.projects.len());
    for project in &registry.projects {
        let marker = match &registry.last_project {
            Some(last) if last.path == project.path => "*",
            _ => " ",
        };
        println!("  {} {} ({})", marker, project.name, project.path.display());
    }
    println!("  keyboard layout: {}", registry.settings.keyboard_layout.name());
    println!();
}

fn print_project(project: &Project) {
    println!("Project '{}' (id {})", project.name, project.id);
    println!("  next id: {}", project.next_available_id());

    println!("  models: {}", project.models.len());
    for model in &project.models {
        println!("    [{}] {} ({})", model.id, model.name, model.mesh_path);
    }
    println!("  terrains: {}", project.terrains.len());
    for terrain in &project.terrains {
        println!(
            "    [{}] {} {}x{} res {}",
            terrain.id, terrain.name, terrain.width, terrain.depth, terrain.vertex_resolution
        );
    }
    println!("  textures: {}", project.textures.len());
    for texture in &project.textures {
        println!("    [{}] {} ({})", texture.id, texture.name, texture.path);
    }

    let current = project.current_scene_id();
    println!("  scenes: {}", project.scenes.len());
    for scene in &project.scenes {
        let marker = if Some(scene.id) == current { "*" } else { " " };
        println!(
            "  {} [{}] {}: {} models, {} terrains",
            marker,
            scene.id,
            scene.name,
            scene.model_instances.len(),
            scene.terrain_instances.len()
        );
    }
}
