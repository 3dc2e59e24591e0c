use jikanwari::adapter::gateway::module_repository::{load_term_config, ModuleRepository};
use jikanwari::adapter::gateway::query_string::{decode_timetable, encode_timetable};
use jikanwari::application::interface::ModuleCatalogTrait;
use jikanwari::application::populate_lessons::{
    flatten_timetable_lessons, populate_sem_timetable_with_lessons,
};
use jikanwari::application::show_timetable::describe_arrangement;
use jikanwari::application::validate_timetable::validate_timetable;
use jikanwari::entity::arrangement::arrange_lessons_for_week;
use jikanwari::entity::module::{is_valid_semester, Semester};
use jikanwari::entity::term::TermConfig;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 4 && args.len() != 5 {
        panic!(
            "usage: {} <modules_dir> <semester> <serialized_timetable> [term_config.yaml]",
            &args[0]
        );
    }

    let semester: Semester = match args[2].parse() {
        Ok(semester) if is_valid_semester(semester) => semester,
        _ => panic!("invalid semester: {}", args[2]),
    };

    let term = match args.get(4) {
        Some(path) => load_term_config(path).unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(1);
        }),
        None => TermConfig::default(),
    };

    let mut module_repository = ModuleRepository::new_with_term_config(&args[1], term);
    if let Err(err) = module_repository.load() {
        eprintln!("{}", err);
        process::exit(1);
    }

    // controllerで実体を見るのを避けるために、1つ関数を切る
    application(&module_repository, semester, &args[3], &term);
}

fn application(
    catalog: &dyn ModuleCatalogTrait,
    semester: Semester,
    serialized: &str,
    term: &TermConfig,
) {
    let timetable = decode_timetable(serialized);
    let (timetable, removed_modules, updated_lessons) =
        validate_timetable(&timetable, catalog, semester);

    for module_code in removed_modules.iter() {
        println!("removed: {}", module_code);
    }
    for (module_code, lesson_type) in updated_lessons.iter() {
        println!("updated: {} {}", module_code, lesson_type);
    }

    let populated = populate_sem_timetable_with_lessons(&timetable, catalog, semester);
    let lessons = flatten_timetable_lessons(&populated);
    let arrangement = arrange_lessons_for_week(&lessons);

    for line in describe_arrangement(&arrangement, term).iter() {
        println!("{}", line);
    }

    // 検証後の共有リンク
    println!("{}", encode_timetable(&timetable));
}
