use std::time::Instant;

use threadlab::{App, LabConfig, ThemeColorize, ThreadlabResult};

fn main() -> ThreadlabResult<()> {
    let started = Instant::now();

    let jobs = smol::block_on(async {
        let mut app = App::new(LabConfig::default())?;
        app.run().await?;
        Ok::<u64, miette::Report>(app.jobs_done())
    })?;

    println!(
        "{} {} {}",
        "crunched".secondary(),
        jobs.to_string().worker_lane(),
        format!("jobs in {:.1}s", started.elapsed().as_secs_f32()).secondary(),
    );

    Ok(())
}
