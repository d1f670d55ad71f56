//! Interactive funnel driver for the terminal.
//!
//! Drives the wizard the same way the web funnel does: render the
//! current step, collect input, let the engine route, and hand off to
//! the submission flow at the contact step. Verification uses the
//! auto-approving stand-in, since there is no real verification service
//! to hand a terminal user to.

use std::io::{self, Write as _};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use url::Url;

use valform_analytics::{FunnelSession, Tracker, TracingSink};
use valform_core::{
    Attribution, Condition, FormState, GarageCapacity, HasGarage, OtherSituation, PropertyType,
    Relationship, SessionId, Situation,
};
use valform_leads::{AutoVerifier, LeadsClient, SubmissionFlow, VerificationOutcome};
use valform_wizard::{
    content, EngineConfig, Outcome, Step, StepInput, Widget, WizardEngine,
};

use crate::config::FunnelConfig;

/// Run the funnel interactively until the terminal step or EOF.
pub async fn run(config: FunnelConfig, entry_url: Option<Url>) -> Result<()> {
    let attribution = entry_url
        .map(|url| Attribution::from_entry_url(&url))
        .unwrap_or_default()
        .with_source("cli");

    let session_id = SessionId::new();
    let tracker = Tracker::new(session_id).with_sink(Arc::new(TracingSink));
    let session = Arc::new(FunnelSession::new(tracker));

    let mut engine = WizardEngine::with_observer(attribution, session.clone()).with_config(
        EngineConfig {
            auto_advance_delay: config.auto_advance(),
        },
    );
    let client = LeadsClient::new(config.leads_config()?).context("building leads client")?;
    let mut flow = SubmissionFlow::new(client, Arc::new(AutoVerifier));

    info!(%session_id, "funnel session starting");
    session.form_started(engine.form());
    engine.start();

    loop {
        let step = engine.current();
        if step.is_terminal() {
            return finish(&config, &engine).await;
        }
        let step_content = content(step, engine.form())
            .ok_or_else(|| anyhow!("engine landed on inapplicable step '{step}'"))?;

        println!("\n[{}] {}", step.number(), step_content.title);
        match step_content.widget {
            Widget::SingleSelect { options } => {
                run_single_select(&mut engine, &session, &options).await?;
            }
            Widget::Slider {
                min,
                max,
                step: increment,
                unit,
            } => {
                run_slider(&mut engine, &session, min, max, increment, unit)?;
            }
            Widget::MultiSelect { options } => {
                run_multi_select(&mut engine, &session, &options)?;
            }
            Widget::ContactForm => {
                run_contact(&mut engine, &mut flow, &session).await?;
            }
            // The terminal step is handled before rendering.
            Widget::Message => return finish(&config, &engine).await,
        }
    }
}

async fn run_single_select(
    engine: &mut WizardEngine,
    session: &FunnelSession,
    options: &[&'static str],
) -> Result<()> {
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {option}", i + 1);
    }
    let line = read_line("choice (or 'back'):")?;
    if go_back(engine, &line) {
        return Ok(());
    }

    let Some(input) = line
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|i| *i < options.len())
        .and_then(|i| select_input(engine.current(), i))
    else {
        println!("  pick a number between 1 and {}", options.len());
        return Ok(());
    };

    match engine.apply(input) {
        Ok(Outcome::AdvanceScheduled(pending)) => {
            tokio::time::sleep(pending.delay).await;
            engine.commit_pending(pending.generation);
        }
        Ok(Outcome::Halted(reason)) => {
            session.disqualified(engine.current(), reason);
            println!("  {}", reason.message());
        }
        Ok(_) => {}
        Err(err) => println!("  {err}"),
    }
    Ok(())
}

fn run_slider(
    engine: &mut WizardEngine,
    session: &FunnelSession,
    min: u64,
    max: u64,
    increment: u64,
    unit: &str,
) -> Result<()> {
    let line = read_line(&format!("value {min}-{max} step {increment}{unit} (or 'back'):"))?;
    if go_back(engine, &line) {
        return Ok(());
    }
    let Ok(value) = line.parse::<u64>() else {
        println!("  enter a number");
        return Ok(());
    };

    let Some(input) = numeric_input(engine.current(), value) else {
        println!("  no numeric input expected here");
        return Ok(());
    };
    if let Err(err) = engine.apply(input) {
        println!("  {err}");
        return Ok(());
    }
    advance(engine, session);
    Ok(())
}

fn run_multi_select(
    engine: &mut WizardEngine,
    session: &FunnelSession,
    options: &[&'static str],
) -> Result<()> {
    loop {
        for (i, option) in options.iter().enumerate() {
            let mark = if engine.form().has_feature(option) {
                "x"
            } else {
                " "
            };
            println!("  [{mark}] {}. {option}", i + 1);
        }
        let line = read_line("toggle number, 'done', or 'back':")?;
        if go_back(engine, &line) {
            return Ok(());
        }
        if line == "done" {
            advance(engine, session);
            return Ok(());
        }
        match line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
        {
            Some(option) => {
                if let Err(err) = engine.apply(StepInput::ToggleFeature((*option).to_string())) {
                    println!("  {err}");
                }
            }
            None => println!("  pick a number between 1 and {}, or 'done'", options.len()),
        }
    }
}

async fn run_contact(
    engine: &mut WizardEngine,
    flow: &mut SubmissionFlow,
    session: &FunnelSession,
) -> Result<()> {
    let first_name = read_line("first name:")?;
    if go_back(engine, &first_name) {
        return Ok(());
    }
    let last_name = read_line("last name:")?;
    let email = read_line("email:")?;
    let mobile = read_line("mobile:")?;

    if let Err(err) = engine.apply(StepInput::Contact {
        first_name,
        last_name,
        email,
        mobile,
    }) {
        println!("  {err}");
        return Ok(());
    }

    match engine.advance() {
        Ok(Outcome::SubmitRequested) => {}
        Ok(other) => return Err(anyhow!("unexpected outcome at contact step: {other:?}")),
        Err(err) => {
            println!("  {err}");
            return Ok(());
        }
    }

    if let Err(err) = flow.submit(engine.form(), session).await {
        if err.is_phone_error() {
            println!("  please enter a valid mobile number");
        } else {
            session.track_error("submit", err.to_string());
            println!("  something went wrong submitting your details: {err}");
        }
        return Ok(());
    }

    match flow.run_verification(engine.form_mut(), session).await {
        Ok(VerificationOutcome::Verified(_)) => {
            engine.complete().context("entering terminal step")?;
            flow.finish(engine.form(), session)
                .context("recording completion")?;
        }
        Ok(VerificationOutcome::Closed) => {
            println!("  verification was closed; submit again when ready");
        }
        Err(err) => {
            session.track_error("verification", err.to_string());
            println!("  verification failed: {err}");
        }
    }
    Ok(())
}

async fn finish(config: &FunnelConfig, engine: &WizardEngine) -> Result<()> {
    if let Some(step_content) = content(Step::ThankYou, engine.form()) {
        println!("\n{}", step_content.title);
    }
    // Single redirect timer, matching the 3 second home redirect.
    tokio::time::sleep(config.redirect_delay()).await;
    info!("redirecting home");
    Ok(())
}

fn advance(engine: &mut WizardEngine, session: &FunnelSession) {
    match engine.advance() {
        Ok(Outcome::Halted(reason)) => {
            session.disqualified(engine.current(), reason);
            println!("  {}", reason.message());
        }
        Ok(_) => {}
        Err(err) => println!("  {err}"),
    }
}

fn go_back(engine: &mut WizardEngine, line: &str) -> bool {
    if line != "back" {
        return false;
    }
    if engine.back().is_none() {
        println!("  already at the first step");
    }
    true
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt} ");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin()
        .read_line(&mut buf)
        .context("reading from stdin")?;
    Ok(buf.trim().to_string())
}

fn select_input(step: Step, index: usize) -> Option<StepInput> {
    match step {
        Step::PropertyType => PropertyType::ALL
            .get(index)
            .copied()
            .map(StepInput::PropertyType),
        Step::Garage => HasGarage::ALL.get(index).copied().map(StepInput::Garage),
        Step::GarageCapacity => GarageCapacity::ALL
            .get(index)
            .copied()
            .map(StepInput::GarageCapacity),
        Step::Condition => Condition::ALL.get(index).copied().map(StepInput::Condition),
        Step::Relationship => Relationship::ALL
            .get(index)
            .copied()
            .map(StepInput::Relationship),
        Step::Situation => Situation::ALL.get(index).copied().map(StepInput::Situation),
        Step::SituationDetail => OtherSituation::ALL
            .get(index)
            .copied()
            .map(StepInput::SituationDetail),
        _ => None,
    }
}

fn numeric_input(step: Step, value: u64) -> Option<StepInput> {
    match step {
        Step::HouseSize => Some(StepInput::HouseSqm(value)),
        Step::LandSize => Some(StepInput::LandSize(value)),
        Step::HouseAge => Some(StepInput::HouseAge(value)),
        Step::Bedrooms => Some(StepInput::Bedrooms(value)),
        Step::Bathrooms => Some(StepInput::Bathrooms(value)),
        Step::CvValuation => Some(StepInput::CvValuation(value)),
        _ => None,
    }
}

/// Print the step table for a form, marking skipped steps.
pub fn print_steps(land_only: bool) {
    let mut form = FormState::default();
    if land_only {
        form.property_type = Some(PropertyType::LandOnly);
    } else {
        form.property_type = Some(PropertyType::FreeStanding);
        form.has_garage = Some(HasGarage::Yes);
    }

    for step in Step::ALL {
        match content(step, &form) {
            Some(step_content) => {
                let widget = match step_content.widget {
                    Widget::SingleSelect { .. } => "single-select",
                    Widget::Slider { .. } => "slider",
                    Widget::MultiSelect { .. } => "multi-select",
                    Widget::ContactForm => "contact form",
                    Widget::Message => "message",
                };
                println!("{:>5}  {:<16} {:<13} {}", step.number(), step.name(), widget, step_content.title);
            }
            None => {
                println!("{:>5}  {:<16} {:<13} (skipped)", step.number(), step.name(), "-");
            }
        }
    }
}
