use tilelevel::classify::classify;
use tilelevel::level::Rgb;
use tilelevel::tileset::Tileset;
use tilelevel::world_file;

#[test]
fn test_worlds() -> anyhow::Result<()> {
    let world_dir = std::fs::read_dir("tests/worlds")?;
    let mut tested = 0;
    let mut failed = Vec::new();

    for entry in world_dir {
        let path = entry?.path();

        match world_file::load(&path) {
            Ok(_) => tested += 1,
            Err(e) => failed.push((path.clone(), e)),
        }
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("Failed to load {:?}: {:#}", path, err);
        }

        panic!("{}/{} worlds failed to load", failed.len(), tested + failed.len());
    }

    Ok(())
}

#[test]
fn classify_loaded_world() -> anyhow::Result<()> {
    let world = world_file::load("tests/worlds/w1.json")?;

    assert_eq!(world.len(), 2);
    assert_eq!(world.level(1)?.background, Rgb::new(0, 80, 100));

    let ground = classify(&world.level(1)?.grid);
    assert_eq!(ground.collidable.len(), 25);
    assert_eq!(ground.non_collidable.len(), 8);
    assert!(ground.non_collidable.iter().all(|t| t.y == 4 && (1..=8).contains(&t.x)));

    let ring = classify(&world.level(2)?.grid);
    assert_eq!(ring.collidable.len(), 8);
    assert!(ring.non_collidable.is_empty());

    Tileset::from(vec!['#', '=', '%']).validate(&world)?;

    Ok(())
}

#[test]
fn jagged_rows_expose_faces() -> anyhow::Result<()> {
    let world = world_file::load("tests/worlds/jagged.json")?;
    let partition = classify(&world.level(1)?.grid);

    assert_eq!(partition.len(), 13);
    assert!(partition.non_collidable.is_empty());

    let res = Tileset::from(vec!['#', '=', '%']).validate(&world);
    assert!(res.is_err());

    Ok(())
}

#[test]
fn empty_world_has_no_levels() -> anyhow::Result<()> {
    let world = world_file::load("tests/worlds/empty.json")?;

    assert!(world.is_empty());
    assert!(world.level(1).is_err());

    Ok(())
}
