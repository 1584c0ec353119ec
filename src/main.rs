use std::error::Error;
use std::io::{stdout, BufWriter};
use std::path::Path;
use std::process::exit;

use clap::{crate_name, crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;

use wnconv::config::Config;
use wnconv::debug_tree::{dump, DEFAULT_MAX_CHILDREN};
use wnconv::resources::write_default_settings;
use wnconv::wordnet_lib::converter::{convert, convert_all, Conversion};
use wnconv::wordnet_lib::lexical_entry::MergePolicy;
use wnconv::xml_tree::Element;

// Subcommand names
const CONVERT_SUB_CMD: &str = "convert";
const BATCH_SUB_CMD: &str = "batch";
const DUMP_SUB_CMD: &str = "dump";
const INIT_SUB_CMD: &str = "init";

// Argument names
const FPATH_SETTING_ARG: &str = "fpath_setting";
const ID_PREFIX_ARG: &str = "id_prefix";
const IN_FILE_ARG: &str = "in_file";
const MAX_CHILDREN_ARG: &str = "max_children";
const MERGE_POLICY_ARG: &str = "merge_policy";
const OUT_FILE_ARG: &str = "out_file";
const QUIET_ARG: &str = "quiet";
const VERBOSE_ARG: &str = "verbose";

const DEFAULT_SETTING_FILE: &str = "wnconv.json";

fn unwrap<T, E: Error>(t: Result<T, E>) -> T {
  match t {
    Ok(t) => t,
    Err(e) => {
      eprintln!("{}: error: {}", crate_name!(), e);
      exit(1);
    }
  }
}

fn init_logger(args: &ArgMatches) {
  unwrap(
    stderrlog::new()
      .module(module_path!())
      .quiet(args.is_present(QUIET_ARG))
      .verbosity(2 + args.occurrences_of(VERBOSE_ARG) as usize)
      .init(),
  );
}

fn convert_one(args: &ArgMatches) {
  let mut conversion = Conversion::new(
    args.value_of(IN_FILE_ARG).unwrap(),
    args.value_of(OUT_FILE_ARG).unwrap(),
    args.value_of(ID_PREFIX_ARG).unwrap_or(""),
  );
  if let Some(policy) = args.value_of(MERGE_POLICY_ARG) {
    conversion.merge_policy = unwrap(policy.parse::<MergePolicy>());
  }
  unwrap(convert(&conversion));
}

fn batch(args: Option<&ArgMatches>) {
  let config = unwrap(Config::setup(
    args.and_then(|args| args.value_of(FPATH_SETTING_ARG)),
  ));
  info!("{} conversions", config.conversions.len());
  unwrap(convert_all(&config.conversions));
}

fn dump_tree(args: &ArgMatches) {
  let root = unwrap(Element::from_path(args.value_of(IN_FILE_ARG).unwrap()));
  let max_children = match args.value_of(MAX_CHILDREN_ARG) {
    Some(n) => unwrap(n.parse::<usize>()),
    None => DEFAULT_MAX_CHILDREN,
  };
  let stdout = stdout();
  let mut writer = BufWriter::new(stdout.lock());
  unwrap(dump(&root, max_children, &mut writer));
}

fn init(args: &ArgMatches) {
  let path = args.value_of(OUT_FILE_ARG).unwrap();
  if unwrap(write_default_settings(path)) {
    println!("{} written", path);
  } else {
    println!("{} already exists", path);
  }
}

fn file_validator(in_file: String) -> Result<(), String> {
  if Path::new(&in_file).is_file() {
    Ok(())
  } else {
    Err(format!(
      "{}: error: {} doesn't exist",
      crate_name!(),
      in_file
    ))
  }
}

fn main() {
  let convert_subcommand = SubCommand::with_name(CONVERT_SUB_CMD)
    .about("Convert one LMF XML file to JSON")
    .help_message("see `convert -h`")
    .arg(
      Arg::with_name(IN_FILE_ARG)
        .short("i")
        .takes_value(true)
        .required(true)
        .help("WordNet LMF XML file")
        .validator(file_validator),
    )
    .arg(
      Arg::with_name(OUT_FILE_ARG)
        .short("o")
        .takes_value(true)
        .required(true)
        .help("output JSON file"),
    )
    .arg(
      Arg::with_name(ID_PREFIX_ARG)
        .short("p")
        .takes_value(true)
        .default_value("")
        .help("literal prefix of every synset id, e.g. oewn-"),
    )
    .arg(
      Arg::with_name(MERGE_POLICY_ARG)
        .short("m")
        .takes_value(true)
        .possible_values(&["overwrite", "union"])
        .help("what to do with a repeated (word, part of speech) pair (default: overwrite)"),
    );

  let batch_subcommand = SubCommand::with_name(BATCH_SUB_CMD)
    .about("(default) Convert every corpus listed in a setting file")
    .help_message("see `batch -h`")
    .arg(
      Arg::with_name(FPATH_SETTING_ARG)
        .short("r")
        .takes_value(true)
        .help("the setting file in JSON format (default: built-in corpora)")
        .validator(file_validator),
    );

  let dump_subcommand = SubCommand::with_name(DUMP_SUB_CMD)
    .about("Print the element outline of an XML file")
    .help_message("see `dump -h`")
    .arg(
      Arg::with_name(MAX_CHILDREN_ARG)
        .short("n")
        .takes_value(true)
        .help("children printed per element (default: 7)"),
    )
    .arg(
      Arg::with_name(IN_FILE_ARG)
        .takes_value(true)
        .required(true)
        .help("XML file")
        .validator(file_validator),
    );

  let init_subcommand = SubCommand::with_name(INIT_SUB_CMD)
    .about("Write the built-in setting file")
    .help_message("see `init -h`")
    .arg(
      Arg::with_name(OUT_FILE_ARG)
        .short("o")
        .takes_value(true)
        .default_value(DEFAULT_SETTING_FILE)
        .help("output file (default: wnconv.json)"),
    );

  let app = App::new("WordNet LMF to JSON converter")
    .version(crate_version!())
    .setting(AppSettings::VersionlessSubcommands)
    .arg(
      Arg::with_name(VERBOSE_ARG)
        .short("v")
        .multiple(true)
        .help("more log output (repeatable)"),
    )
    .arg(
      Arg::with_name(QUIET_ARG)
        .short("q")
        .help("no log output"),
    )
    .subcommand(convert_subcommand)
    .subcommand(batch_subcommand)
    .subcommand(dump_subcommand)
    .subcommand(init_subcommand);
  let matches = app.get_matches();
  init_logger(&matches);

  match matches.subcommand() {
    (CONVERT_SUB_CMD, Some(convert_matches)) => convert_one(convert_matches),
    (BATCH_SUB_CMD, Some(batch_matches)) => batch(Some(batch_matches)),
    (DUMP_SUB_CMD, Some(dump_matches)) => dump_tree(dump_matches),
    (INIT_SUB_CMD, Some(init_matches)) => init(init_matches),
    _ => batch(None),
  }
}
