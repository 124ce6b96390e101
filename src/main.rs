use std::process::ExitCode;

fn main() -> ExitCode {
    blog_mirror_lib::run()
}
