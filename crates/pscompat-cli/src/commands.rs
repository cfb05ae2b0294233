//! Subcommand implementations.
//!
//! Each command loads a profile, reads it only through the query views and
//! returns both a JSON payload and a human rendering.

use crate::exit_codes::ExitCode;
use pscompat_common::{eq_ignore_case, Error, Result, SemanticVersion};
use pscompat_profile::query::{CommandQuery, MembersQuery, ModuleQuery};
use pscompat_profile::{document, LoadedProfile, StoreResolver};
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// What a command produced.
#[derive(Debug)]
pub struct CommandOutput {
    pub exit: ExitCode,
    pub json: Value,
    pub human: String,
}

impl CommandOutput {
    fn ok(json: Value, human: String) -> Self {
        CommandOutput {
            exit: ExitCode::Clean,
            json,
            human,
        }
    }

    fn not_found(what: &str, name: &str) -> Self {
        CommandOutput {
            exit: ExitCode::NotFound,
            json: json!({ "status": "not_found", "kind": what, "name": name }),
            human: format!("{} not found: {}", what, name),
        }
    }
}

/// Open `target` as a file path, or as a profile id in the store when no
/// such file exists and the target looks like a bare id.
pub fn open_profile(store: &StoreResolver, target: &str) -> Result<LoadedProfile> {
    let path = Path::new(target);
    if path.exists() || target.contains(['/', '\\']) || path.extension().is_some_and(|e| e == "json") {
        return document::load_profile(path);
    }
    debug!(id = target, "resolving profile id in store");
    store.load(target)
}

pub fn check(loaded: &LoadedProfile) -> CommandOutput {
    let query = loaded.profile.query();
    let runtime = query.runtime();
    let module_names = runtime.map_or(0, |r| r.module_names().len());
    let module_versions = runtime.map_or(0, |r| r.module_count());

    let json = json!({
        "status": "ok",
        "path": loaded.source.path,
        "sha256": loaded.source.sha256,
        "id": query.id(),
        "modules": module_names,
        "module_versions": module_versions,
    });
    let human = format!(
        "ok {} ({} modules, {} module versions)\nsha256 {}",
        query.id().unwrap_or("<no id>"),
        module_names,
        module_versions,
        loaded.source.sha256
    );
    CommandOutput::ok(json, human)
}

pub fn summary(loaded: &LoadedProfile) -> CommandOutput {
    let query = loaded.profile.query();
    let platform = query.platform().map(|p| p.summary());
    let runtime = query.runtime();

    let modules = runtime.map_or(0, |r| r.module_names().len());
    let module_versions = runtime.map_or(0, |r| r.module_count());
    let commands: usize = runtime.map_or(0, |r| r.modules().map(|m| m.command_count()).sum());
    let common_parameters = runtime.map_or(0, |r| r.common_parameter_names().len());
    let types = runtime.and_then(|r| r.types());
    let assemblies = types.map_or(0, |t| t.assemblies().count());
    let type_count: usize = types.map_or(0, |t| t.assemblies().map(|a| a.type_count()).sum());

    let json = json!({
        "id": query.id(),
        "constituent_profiles": query.constituent_profiles(),
        "platform": platform,
        "modules": modules,
        "module_versions": module_versions,
        "commands": commands,
        "common_parameters": common_parameters,
        "assemblies": assemblies,
        "types": type_count,
    });

    let mut human = String::new();
    let _ = writeln!(human, "{}", query.id().unwrap_or("<no id>"));
    let _ = writeln!(human, "  platform:   {}", platform.as_deref().unwrap_or("unknown"));
    let _ = writeln!(human, "  modules:    {} ({} versions, {} commands)", modules, module_versions, commands);
    let _ = writeln!(human, "  common:     {} parameters", common_parameters);
    let _ = write!(human, "  types:      {} in {} assemblies", type_count, assemblies);
    CommandOutput::ok(json, human)
}

pub fn modules(loaded: &LoadedProfile, name: Option<&str>) -> CommandOutput {
    let query = loaded.profile.query();
    let Some(runtime) = query.runtime() else {
        return match name {
            Some(name) => CommandOutput::not_found("module", name),
            None => CommandOutput::ok(json!({ "modules": [] }), String::new()),
        };
    };

    let names: Vec<&str> = match name {
        Some(wanted) => match runtime.modules_named(wanted).first() {
            Some(module) => vec![module.name()],
            None => return CommandOutput::not_found("module", wanted),
        },
        None => runtime.module_names(),
    };

    let mut entries = Vec::new();
    let mut human = String::new();
    for module_name in names {
        let versions: Vec<String> = runtime
            .module_versions(module_name)
            .into_iter()
            .map(SemanticVersion::to_string)
            .collect();
        let _ = writeln!(human, "{} {}", module_name, versions.join(", "));
        entries.push(json!({ "name": module_name, "versions": versions }));
    }
    CommandOutput::ok(json!({ "modules": entries }), human.trim_end().to_string())
}

pub fn command(
    loaded: &LoadedProfile,
    name: &str,
    module: Option<&str>,
    version: Option<&str>,
) -> Result<CommandOutput> {
    let version = version.map(str::parse::<SemanticVersion>).transpose()?;
    let query = loaded.profile.query();
    let Some(runtime) = query.runtime() else {
        return Ok(CommandOutput::not_found("command", name));
    };

    let matches: Vec<_> = runtime
        .find_command(name)
        .into_iter()
        .filter(|m| module.is_none_or(|wanted| eq_ignore_case(m.module.name(), wanted)))
        .filter(|m| version.as_ref().is_none_or(|wanted| m.module.version() == wanted))
        .collect();

    let natives = if module.is_none() && version.is_none() {
        runtime.native_commands(name).unwrap_or_default()
    } else {
        &[]
    };

    if matches.is_empty() && natives.is_empty() {
        return Ok(CommandOutput::not_found("command", name));
    }

    let mut human = String::new();
    let mut entries = Vec::new();
    for found in &matches {
        entries.push(command_json(&found.module, &found.command));
        render_command(&mut human, &found.module, &found.command);
    }

    let native_entries: Vec<Value> = natives
        .iter()
        .map(|n| json!({ "path": n.path, "version": n.version }))
        .collect();
    for native in natives {
        let _ = writeln!(
            human,
            "native {} {}",
            native.path,
            native.version.as_ref().map(ToString::to_string).unwrap_or_default()
        );
    }

    Ok(CommandOutput::ok(
        json!({ "name": name, "matches": entries, "native": native_entries }),
        human.trim_end().to_string(),
    ))
}

fn command_json(module: &ModuleQuery<'_>, command: &CommandQuery<'_>) -> Value {
    let parameters: Vec<Value> = command
        .parameters()
        .map(|p| {
            json!({
                "name": p.name(),
                "type": p.type_name(),
                "dynamic": p.is_dynamic(),
                "parameter_sets": p.parameter_sets().map(|(set, _)| set).collect::<Vec<_>>(),
            })
        })
        .collect();
    let aliases: Vec<Value> = command
        .parameter_aliases()
        .map(|(alias, canonical)| json!({ "alias": alias, "parameter": canonical }))
        .collect();

    json!({
        "module": module.name(),
        "version": module.version(),
        "name": command.name(),
        "kind": format!("{:?}", command.kind()).to_lowercase(),
        "cmdlet_binding": command.cmdlet_binding(),
        "output_types": command.output_types(),
        "parameter_sets": command.parameter_sets(),
        "default_parameter_set": command.default_parameter_set(),
        "parameters": parameters,
        "parameter_aliases": aliases,
    })
}

fn render_command(out: &mut String, module: &ModuleQuery<'_>, command: &CommandQuery<'_>) {
    let _ = writeln!(
        out,
        "{} ({:?}) in {} {}",
        command.name(),
        command.kind(),
        module.name(),
        module.version()
    );
    if let Some(default_set) = command.default_parameter_set() {
        let _ = writeln!(out, "  default set: {}", default_set);
    }
    for parameter in command.parameters() {
        let _ = writeln!(out, "  -{} [{}]", parameter.name(), parameter.type_name().unwrap_or("?"));
    }
}

pub fn platform(loaded: &LoadedProfile) -> Result<CommandOutput> {
    let query = loaded.profile.query();
    let Some(platform) = query.platform() else {
        return Ok(CommandOutput::not_found("platform", query.id().unwrap_or("<no id>")));
    };

    let json = serde_json::to_value(platform.descriptor()).map_err(|e| Error::Serialize(e.to_string()))?;

    let mut human = String::new();
    let _ = writeln!(human, "{}", platform.summary());
    if let Some(os) = platform.operating_system() {
        if let Some(pretty) = os.distribution_pretty_name().or(os.description()) {
            let _ = writeln!(human, "  os:         {}", pretty);
        }
        if let Some(family) = os.family() {
            let _ = writeln!(human, "  family:     {}", family);
        }
    }
    if let Some(dotnet) = platform.dotnet() {
        let _ = writeln!(
            human,
            "  .NET:       {} {}",
            dotnet.runtime().map(|r| r.to_string()).unwrap_or_default(),
            dotnet.clr_version().map(ToString::to_string).unwrap_or_default()
        );
    }
    if let Some(machine) = platform.machine() {
        let _ = writeln!(
            human,
            "  machine:    {} bit, {} processors",
            machine.bitness().map(|b| b.to_string()).unwrap_or_else(|| "?".into()),
            machine.processor_count().map(|c| c.to_string()).unwrap_or_else(|| "?".into())
        );
    }
    Ok(CommandOutput::ok(json, human.trim_end().to_string()))
}

pub fn types(loaded: &LoadedProfile, name: &str) -> CommandOutput {
    let query = loaded.profile.query();
    let Some(ty) = query.runtime().and_then(|r| r.types()).and_then(|t| t.resolve(name)) else {
        return CommandOutput::not_found("type", name);
    };

    let json = json!({
        "full_name": ty.full_name(),
        "assembly": ty.assembly(),
        "static": ty.static_members().map(|m| members_json(&m)),
        "instance": ty.instance_members().map(|m| members_json(&m)),
    });

    let mut human = String::new();
    let _ = writeln!(human, "{} from {}", ty.full_name(), ty.assembly());
    render_members(&mut human, "static", ty.static_members());
    render_members(&mut human, "instance", ty.instance_members());
    CommandOutput::ok(json, human.trim_end().to_string())
}

fn members_json(members: &MembersQuery<'_>) -> Value {
    json!({
        "fields": members.field_names(),
        "properties": members.property_names(),
        "methods": members.method_names(),
        "events": members.event_names(),
        "indexers": members.indexers().map_or(0, <[_]>::len),
        "constructors": members.constructors().map_or(0, |c| c.overload_parameters.len()),
    })
}

fn render_members(out: &mut String, label: &str, members: Option<MembersQuery<'_>>) {
    let Some(members) = members else { return };
    let _ = writeln!(out, "  {}:", label);
    for name in members.property_names() {
        let _ = writeln!(out, "    property {}", name);
    }
    for name in members.method_names() {
        let _ = writeln!(out, "    method   {}", name);
    }
    for name in members.field_names() {
        let _ = writeln!(out, "    field    {}", name);
    }
    for name in members.event_names() {
        let _ = writeln!(out, "    event    {}", name);
    }
}

pub fn list(store: &StoreResolver) -> Result<CommandOutput> {
    let (dir, resolution) = store.resolve_profile_dir();
    let entries = store.list_profiles()?;

    let mut human = String::new();
    for entry in &entries {
        let _ = writeln!(human, "{}\t{}", entry.id, entry.path.display());
    }
    Ok(CommandOutput::ok(
        json!({
            "profile_dir": dir,
            "resolution": resolution,
            "profiles": entries,
        }),
        human.trim_end().to_string(),
    ))
}
