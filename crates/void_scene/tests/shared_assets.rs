use glam::Vec3;
use void_scene::{IntegrityIssue, ModelInstance, Project, TerrainInstance};

#[test]
fn test_scenes_share_project_assets() {
    let mut project = Project::new("world", "/projects/world");
    let tree = project.add_model("tree", "models/tree.obj");
    let meadow = project.add_terrain("meadow", 64);
    let day = project.add_scene("Day");
    let night = project.add_scene("Night");

    for scene_id in [day, night] {
        let instance = project.next_id();
        let ground = project.next_id();
        let scene = project.scene_mut(scene_id).unwrap();
        scene.add_model_instance(ModelInstance::new(instance, "tree", tree));
        scene.add_terrain_instance(TerrainInstance::new(ground, "ground", meadow).at(Vec3::ZERO));
    }

    let users: Vec<_> = project
        .scenes
        .iter()
        .filter(|s| s.referenced_models().any(|m| m == tree))
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(users, vec!["Day", "Night"]);
    assert_eq!(project.models.len(), 1);
    assert!(project.integrity_issues().is_empty());
}

#[test]
fn test_removing_an_asset_breaks_every_user() {
    let mut project = Project::new("world", "/projects/world");
    let meadow = project.add_terrain("meadow", 64);
    let day = project.add_scene("Day");
    let night = project.add_scene("Night");
    for scene_id in [day, night] {
        let ground = project.next_id();
        project
            .scene_mut(scene_id)
            .unwrap()
            .add_terrain_instance(TerrainInstance::new(ground, "ground", meadow));
    }

    project.terrains.remove(meadow);

    let issues = project.integrity_issues();
    assert_eq!(issues.len(), 2);
    assert!(issues
        .iter()
        .all(|i| matches!(i, IntegrityIssue::MissingTerrain { terrain, .. } if *terrain == meadow)));
}

#[test]
fn test_removed_current_scene_moves_to_first() {
    let mut project = Project::new("world", "/projects/world");
    let day = project.add_scene("Day");
    let night = project.add_scene("Night");
    project.set_current_scene(night);

    project.remove_scene(night);
    assert_eq!(project.current_scene_id(), Some(day));

    project.remove_scene(day);
    assert_eq!(project.current_scene_id(), None);
    assert!(project.integrity_issues().is_empty());
}
