//! End-to-end tests for a full run
//!
//! Exercises the whole flow the way a resolver drives it: prepare target
//! directories from worker threads, fetch into staging with the process
//! runner, verify and promote the content, then persist the deploy result and
//! fire the post-run command once every worker is done.

#![cfg(unix)]

use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use syncroot_core::{
    DeployResult, DeployResultStore, EnvironmentDeploy, ModuleDeploy, Preparation, RunOptions,
    Settings, SourceSettings, SyncRun,
};
use syncroot_fs::{NormalizedPath, Promotion, file_checksum, promote};

const ENVIRONMENTS: [&str; 3] = ["env_development", "env_production", "env_staging"];

fn settings(temp: &TempDir) -> Settings {
    let mut settings = Settings {
        timeout: 10,
        cachedir: temp.child("cache").path().display().to_string(),
        postrun: vec![
            "sh".into(),
            "-c".into(),
            format!(
                "'echo $modifiedenvs > {}'",
                temp.child("postrun.out").path().display()
            ),
        ],
        ..Settings::default()
    };
    settings.sources.insert(
        "example".into(),
        SourceSettings {
            basedir: temp.child("envs").path().display().to_string(),
            strip_component: Some("env_".into()),
        },
    );
    settings
}

/// Fetch one environment's content through staging into its target.
fn deploy_environment(
    run: &SyncRun,
    staging: &NormalizedPath,
    environment: &str,
) -> EnvironmentDeploy {
    let source = &run.settings().sources["example"];
    let name = run
        .record_environment(Some("example"), environment)
        .unwrap();
    let target = run
        .prepare_target(
            format!("{}/{}/", source.basedir, name),
            "sources.example.basedir",
            Preparation::Purge,
        )
        .unwrap()
        .unwrap();

    let staged = staging.join(&format!("{name}.pp"));
    let fetched = run.fetch(
        &format!("sh -c 'echo \"node default {{}} # {name}\" > {staged}'"),
        false,
    );
    assert!(fetched.success(), "{}", fetched.output);

    let checksum = file_checksum(&staged.to_native()).unwrap();
    let dest = target.join("site.pp");
    promote(&staged.to_native(), &dest.to_native(), true).unwrap();
    assert_eq!(file_checksum(&dest.to_native()).unwrap(), checksum);

    let mut deploy = EnvironmentDeploy::started(name, "4f2a9c1").with_module(
        "site",
        ModuleDeploy {
            source: "example".into(),
            version: checksum.clone(),
            cache_hit: false,
        },
    );
    deploy.manifest_checksum = Some(checksum);
    deploy.finish(true)
}

#[test]
fn full_run_deploys_records_and_notifies() {
    let temp = TempDir::new().unwrap();
    let settings = settings(&temp);
    let run = SyncRun::new(settings.clone(), RunOptions::default()).unwrap();

    let cache = run
        .prepare_target(&settings.cachedir, "cachedir", Preparation::Reuse)
        .unwrap()
        .unwrap();
    let staging = run
        .prepare_target(cache.join("staging"), "cachedir", Preparation::Purge)
        .unwrap()
        .unwrap();

    let deploys: Vec<EnvironmentDeploy> = std::thread::scope(|scope| {
        let handles: Vec<_> = ENVIRONMENTS
            .iter()
            .map(|env| {
                let run = &run;
                let staging = &staging;
                scope.spawn(move || deploy_environment(run, staging, env))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut record = DeployResult::new();
    for deploy in deploys {
        record.insert(deploy);
    }

    let location = NormalizedPath::new(temp.child("envs").path());
    let finish = run.finish(&location, &record, "main");

    // Every environment landed with its content
    for name in ["development", "production", "staging"] {
        temp.child(format!("envs/{name}/site.pp"))
            .assert(predicates::str::contains(format!("# {name}")));
    }
    // Staging was drained by the moves
    assert_eq!(std::fs::read_dir(staging.to_native()).unwrap().count(), 0);

    // Deploy result round-trips from disk
    let written = finish.deploy_result.unwrap();
    assert_eq!(written, location.join(".syncroot-deploy.json"));
    let stored = DeployResultStore::new().read(&written);
    assert_eq!(stored, record);
    assert_eq!(stored.len(), 3);
    assert!(stored.all_succeeded());

    // Hook saw the stripped, sorted environments
    assert!(finish.hook.unwrap().success());
    temp.child("postrun.out")
        .assert("development production staging\n");
    assert_eq!(
        finish.changes.environments,
        vec!["development", "production", "staging"]
    );
}

#[test]
fn rerun_replaces_stale_environment_content() {
    let temp = TempDir::new().unwrap();
    let settings = settings(&temp);
    temp.child("envs/production/stale.pp").write_str("old").unwrap();

    let run = SyncRun::new(settings.clone(), RunOptions::default()).unwrap();
    let staging = run
        .prepare_target(temp.child("staging").path(), "cachedir", Preparation::Purge)
        .unwrap()
        .unwrap();
    deploy_environment(&run, &staging, "env_production");

    temp.child("envs/production/stale.pp")
        .assert(predicates::path::missing());
    temp.child("envs/production/site.pp")
        .assert(predicates::path::exists());
}

#[test]
fn identical_content_shares_a_cache_key() {
    let temp = TempDir::new().unwrap();
    temp.child("a/module.tar.gz").write_binary(&[1, 2, 3]).unwrap();
    temp.child("b/module.tar.gz").write_binary(&[1, 2, 3]).unwrap();
    temp.child("c/module.tar.gz").write_binary(&[1, 2, 4]).unwrap();

    let key = |p: &str| file_checksum(temp.child(p).path()).unwrap();
    assert_eq!(key("a/module.tar.gz"), key("b/module.tar.gz"));
    assert_ne!(key("a/module.tar.gz"), key("c/module.tar.gz"));
    assert_eq!(key("a/module.tar.gz").len(), 64);
}

#[test]
fn failed_fetch_with_cache_fallback_keeps_previous_content() {
    let temp = TempDir::new().unwrap();
    let mut settings = settings(&temp);
    settings.use_cache_fallback = true;
    temp.child("cache/site.pp").write_str("cached").unwrap();

    let run = SyncRun::new(settings, RunOptions::default()).unwrap();
    let target = run
        .prepare_target(temp.child("envs/production").path(), "basedir", Preparation::Reuse)
        .unwrap()
        .unwrap();

    let fetched = run.fetch("sh -c 'echo unreachable >&2; exit 128'", false);
    assert_eq!(fetched.exit_code, 128);
    assert!(fetched.output.contains("unreachable"));

    let outcome = promote(
        temp.child("cache/site.pp").path(),
        &target.join("site.pp").to_native(),
        false,
    )
    .unwrap();
    assert_eq!(outcome, Promotion::Copied { bytes: 6 });
    temp.child("cache/site.pp").assert("cached");
    temp.child("envs/production/site.pp").assert("cached");
}
