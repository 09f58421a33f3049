//! Scene graph demo
//!
//! Builds a small solar system, moves things around and logs the resulting
//! world poses. Pass a `.toml` or `.ron` engine config as the first argument
//! to override the defaults.

use xen_engine::foundation::{logging, math};
use xen_engine::prelude::*;

fn load_config() -> Result<EngineConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn log_pose(scene: &Scene, entity: EntityId) {
    let name = scene
        .state()
        .get_component::<TagComponent>(entity)
        .map_or("<unnamed>", |tag| tag.name.as_str());

    match scene.state().get_component::<TransformComponent>(entity) {
        Some(transform) => {
            let p = transform.position();
            let r = transform.rotation();
            log::info!(
                "{name:>8} {entity}: position ({:.2}, {:.2}, {:.2}) rotation ({:.1}, {:.1}, {:.1})",
                p.x, p.y, p.z, r.x, r.y, r.z
            );
        }
        None => log::info!("{name:>8} {entity}: no transform"),
    }
}

fn spawn(scene: &mut Scene, parent: Option<EntityId>, name: &str, local: &Mat4) -> Result<EntityId, EcsError> {
    let entity = scene.create_entity(parent);
    scene.state_mut().insert_component(entity, TagComponent::new(name))?;
    scene.set_local_transform(entity, local);
    Ok(entity)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);
    log::info!("Starting scene demo");

    let mut scene = Scene::with_config(config.scene, GameState::new());

    let sun = spawn(&mut scene, None, "sun", &Mat4::identity())?;
    let planet = spawn(&mut scene, Some(sun), "planet", &Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0)))?;
    let moon = spawn(&mut scene, Some(planet), "moon", &Mat4::new_translation(&Vec3::new(2.0, 0.0, 0.0)))?;
    let probe = spawn(&mut scene, Some(moon), "probe", &Mat4::new_translation(&Vec3::new(0.0, 0.5, 0.0)))?;

    for entity in [sun, planet, moon, probe] {
        log_pose(&scene, entity);
    }

    // Orbit the planet a quarter turn around the sun
    log::info!("Rotating sun by 90 degrees of roll");
    scene.set_local_transform(sun, &math::compose_trs(&Vec3::zeros(), &Vec3::new(0.0, 0.0, 90.0), &Vec3::repeat(1.0)));
    for entity in [planet, moon, probe] {
        log_pose(&scene, entity);
    }

    // Hand the probe over to the planet; it stays where it is
    log::info!("Attaching probe to planet");
    scene.attach_entity(probe, planet);
    log_pose(&scene, probe);

    log::info!("Detaching moon");
    scene.detach_entity(moon);
    log_pose(&scene, moon);

    log::info!("Removing planet and its subtree");
    scene.remove_entity(planet);
    log::info!("{} entities remain in '{}'", scene.entity_count(), scene.name());

    if let Err(err) = scene.save_to_file("demo.scene") {
        log::warn!("{err}");
    }

    scene.unload();
    log::info!("Scene demo finished");
    Ok(())
}
