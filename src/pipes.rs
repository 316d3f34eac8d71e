use std::io::{self, PipeReader};
use std::process::{Child, Command as Process, Stdio};

use crate::error::ShellError;
use crate::parser::Pipeline;

/// Execute a pipeline with the last stage writing to the shell's stdout.
pub fn run_pipeline(pipeline: &Pipeline) -> Result<(), ShellError> {
    run_pipeline_into(pipeline, Stdio::inherit())
}

/// Execute a pipeline of commands
/// Connects stdout of each command to stdin of the next, and the last one to `output`.
///
/// Every pipe is created and wired before the first process starts, all
/// processes are started, then every one is waited on in order. The first
/// failure wins, but no stage is left unreaped.
pub fn run_pipeline_into(pipeline: &Pipeline, output: Stdio) -> Result<(), ShellError> {
    if pipeline.is_empty() {
        return Ok(());
    }

    let mut processes = connect(pipeline, output)?;

    let mut children: Vec<(&str, Child)> = Vec::with_capacity(processes.len());
    let mut start_error = None;
    for (process, stage) in processes.iter_mut().zip(pipeline.commands()) {
        match process.spawn() {
            Ok(child) => {
                debug_log!("started {} (pid {})", stage.name(), child.id());
                children.push((stage.name(), child));
            }
            Err(source) => {
                start_error = Some(ShellError::Spawn {
                    program: stage.name().to_string(),
                    source,
                });
                break;
            }
        }
    }

    // Drop our copies of the pipe ends, otherwise readers never see EOF.
    drop(processes);

    if let Some(err) = start_error {
        abort(children);
        return Err(err);
    }

    let mut outcome = Ok(());
    for (name, mut child) in children {
        let result = match child.wait() {
            Ok(status) => {
                debug_log!("{} exited: {}", name, status);
                if status.success() {
                    Ok(())
                } else {
                    Err(ShellError::Failed {
                        program: name.to_string(),
                        status,
                    })
                }
            }
            Err(source) => Err(ShellError::Wait {
                program: name.to_string(),
                source,
            }),
        };

        if let Err(err) = result {
            if outcome.is_ok() {
                outcome = Err(err);
            }
        }
    }

    outcome
}

/// Build one process per stage with its stdin and stdout already attached.
fn connect(pipeline: &Pipeline, output: Stdio) -> Result<Vec<Process>, ShellError> {
    let last = pipeline.len() - 1;
    let mut processes = Vec::with_capacity(pipeline.len());
    let mut previous_stdout: Option<PipeReader> = None;
    let mut output = Some(output);

    for (i, stage) in pipeline.commands().iter().enumerate() {
        let mut process = Process::new(stage.name());
        process.args(stage.arguments());

        if let Some(stdin) = previous_stdout.take() {
            process.stdin(stdin);
        }

        if i < last {
            let (reader, writer) = io::pipe().map_err(ShellError::Pipe)?;
            process.stdout(writer);
            previous_stdout = Some(reader);
        } else if let Some(stdout) = output.take() {
            process.stdout(stdout);
        }

        debug_log!("stage {}: {}", i, stage);
        processes.push(process);
    }

    Ok(processes)
}

/// Kill and reap stages that were started before a later one failed to start.
fn abort(children: Vec<(&str, Child)>) {
    for (name, mut child) in children {
        debug_log!("killing {} (pid {}) after start failure", name, child.id());
        if let Err(e) = child.kill() {
            debug_log!("kill {}: {}", name, e);
        }
        if let Err(e) = child.wait() {
            debug_log!("wait {}: {}", name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pipeline;
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;
    use std::fs;
    use std::io::Read;
    use std::time::{Duration, Instant};

    /// True if some live process has exactly this argv.
    fn process_running(argv: &[&str]) -> bool {
        let wanted: String = argv.iter().map(|a| format!("{a}\0")).collect();
        let Ok(entries) = fs::read_dir("/proc") else {
            return false;
        };
        entries
            .flatten()
            .filter_map(|entry| fs::read(entry.path().join("cmdline")).ok())
            .any(|cmdline| cmdline == wanted.as_bytes())
    }

    fn run_captured(line: &str) -> (Result<(), ShellError>, String) {
        let pipeline = parse_pipeline(line);
        let (mut reader, writer) = io::pipe().unwrap();
        let result = run_pipeline_into(&pipeline, writer.into());
        let mut captured = String::new();
        reader.read_to_string(&mut captured).unwrap();
        (result, captured)
    }

    #[test]
    fn test_single_stage() {
        let (result, out) = run_captured("echo hello world");
        assert!(result.is_ok());
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn test_two_stages() {
        let (result, out) = run_captured("echo hello | cat");
        assert!(result.is_ok());
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn test_three_stages() {
        let (result, out) = run_captured("echo rust shell | tr a-z A-Z | cat");
        assert!(result.is_ok());
        assert_eq!(out, "RUST SHELL\n");
    }

    #[test]
    fn test_output_larger_than_pipe_buffer() {
        // seq writes well past a 64 KiB pipe buffer while wc drains it.
        let (result, out) = run_captured("seq 1 100000 | cat | wc -l");
        assert!(result.is_ok());
        assert_eq!(out.trim(), "100000");
    }

    #[test]
    fn test_failing_first_stage_still_runs_the_rest() {
        let (result, out) = run_captured("false | echo done");
        assert_eq!(out, "done\n");
        match result {
            Err(ShellError::Failed { program, status }) => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            other => panic!("expected failure from false, got {:?}", other),
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let (result, _) = run_captured("false | grep nothing");
        assert!(matches!(result, Err(ShellError::Failed { ref program, .. }) if program == "false"));
    }

    #[test]
    fn test_last_stage_failure() {
        let (result, _) = run_captured("true | false");
        assert!(matches!(result, Err(ShellError::Failed { ref program, .. }) if program == "false"));
    }

    #[test]
    fn test_missing_program_aborts_start() {
        let (result, out) = run_captured("cat | no-such-program-ccsh-test");
        assert!(out.is_empty());
        match result {
            Err(ShellError::Spawn { program, source }) => {
                assert_eq!(program, "no-such-program-ccsh-test");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected spawn failure, got {:?}", other),
        }
    }

    #[test]
    fn test_start_failure_kills_started_stages() {
        let start = Instant::now();
        let (result, _) = run_captured("sleep 30.4217 | no-such-program-ccsh-test");
        assert!(matches!(result, Err(ShellError::Spawn { .. })));
        assert!(start.elapsed() < Duration::from_secs(10));
        assert!(!process_running(&["sleep", "30.4217"]));
    }

    #[test]
    fn test_abort_reaps_children() {
        let child = Process::new("sleep").arg("30").spawn().unwrap();
        let pid = Pid::from_raw(child.id() as i32);
        assert_eq!(kill(pid, None), Ok(()));

        abort(vec![("sleep", child)]);

        // a zombie would still accept signal 0
        assert_eq!(kill(pid, None), Err(Errno::ESRCH));
    }

    #[test]
    fn test_empty_pipeline_is_noop() {
        assert!(run_pipeline_into(&Pipeline::default(), Stdio::null()).is_ok());
    }
}
