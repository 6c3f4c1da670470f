use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_storyboard-engine"))
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Storyboard & Prompt Generator"));
}

#[test]
fn test_cli_default_runs_showcase() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("AI智能生产系统"))
        .stdout(predicate::str::contains("🎬 分镜故事板"))
        .stdout(predicate::str::contains("英文提示词:\n```\n"))
        .stdout(predicate::str::contains("中文描述:\n```\n"))
        .stdout(predicate::str::contains("动态公式: "));
}

#[test]
fn test_cli_storyboard_headers() {
    cmd()
        .args(["storyboard", "--scenes", "1", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("|   场号 |   镜号 | SHOT"))
        .stdout(predicate::str::contains("时长(s)"));
}

#[test]
fn test_cli_zero_scenes_prints_header_rows_only() {
    let assert = cmd().args(["storyboard", "--scenes", "0"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_cli_seed_is_reproducible() {
    let run = || {
        let assert = cmd()
            .args(["storyboard", "--scenes", "2", "--seed", "2024"])
            .assert()
            .success();
        assert.get_output().stdout.clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_cli_image_prompt_single_language() {
    cmd()
        .args(["image-prompt", "--lang", "zh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("拍摄主体:冯宝宝(纳米机甲版)"))
        .stdout(predicate::str::contains("英文提示词").not());
}

#[test]
fn test_cli_image_prompt_both_languages() {
    cmd()
        .args(["image-prompt", "--lang", "both"])
        .assert()
        .success()
        .stdout(predicate::str::contains("英文提示词"))
        .stdout(predicate::str::contains("中文描述"));
}

#[test]
fn test_cli_env_overrides_production() {
    cmd()
        .arg("image-prompt")
        .env("STORYBOARD_PRODUCTION__MAIN_CHARACTER", "张楚岚")
        .assert()
        .success()
        .stdout(predicate::str::contains("张楚岚"))
        .stdout(predicate::str::contains("冯宝宝").not());
}

#[test]
fn test_cli_video_prompt() {
    cmd()
        .arg("video-prompt")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[^+]+ \+ [^+]+ \+ [^+]+\n$").unwrap());
}

#[test]
fn test_cli_vocab_lists_tables() {
    cmd()
        .arg("vocab")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content pack v2.0"))
        .stdout(predicate::str::contains("storyboard.shot_types"))
        .stdout(predicate::str::contains("motion.results"));
}

#[test]
fn test_cli_custom_pack_and_config() {
    let mut pack = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    pack.write_all(
        r#"
        [vocabulary.motion]
        camera_moves = ["一镜到底"]
        actions = ["拔刀"]
        results = ["收刀"]
        "#
        .as_bytes(),
    )
    .unwrap();

    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    config
        .write_all("[production]\nmain_character = \"张楚岚\"\n".as_bytes())
        .unwrap();

    cmd()
        .arg("video-prompt")
        .arg("--pack")
        .arg(pack.path())
        .assert()
        .success()
        .stdout("一镜到底 + 拔刀 + 收刀\n");

    cmd()
        .arg("image-prompt")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("张楚岚"));
}

#[test]
fn test_cli_invalid_pack_fails() {
    let mut pack = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    pack.write_all("[templates]\nsound = \"{volume}\"\n".as_bytes())
        .unwrap();

    cmd()
        .arg("--pack")
        .arg(pack.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown placeholder"));
}
