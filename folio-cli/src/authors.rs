use clap::{App, Arg, ArgMatches, SubCommand};
use folio_models::{authors::Author, validation, Connection};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("authors")
        .about("Manage authors")
        .subcommand(SubCommand::with_name("list").about("List all authors"))
        .subcommand(
            SubCommand::with_name("promote")
                .arg(
                    Arg::with_name("user-id")
                        .short("u")
                        .long("user-id")
                        .takes_value(true)
                        .help("The id of the user to promote"),
                )
                .arg(
                    Arg::with_name("pen-name")
                        .short("n")
                        .long("pen-name")
                        .takes_value(true)
                        .help("The public pen name of the new author"),
                )
                .arg(
                    Arg::with_name("bio")
                        .short("b")
                        .long("bio")
                        .takes_value(true)
                        .help("A short biography"),
                )
                .about("Promote an existing user to author"),
        )
}

pub fn run<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    match args.subcommand() {
        ("list", Some(_)) => list(conn),
        ("promote", Some(x)) => promote(x, conn),
        _ => println!("Unknown subcommand"),
    }
}

fn list(conn: &Connection) {
    for author in Author::list(conn).expect("Couldn't list authors") {
        let followers = author
            .count_followers(conn)
            .expect("Couldn't count followers");
        println!(
            "{}\t{}\t{} follower(s)",
            author.id, author.pen_name, followers
        );
    }
}

fn promote<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let user_id = args
        .value_of("user-id")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("User id"))
        .parse::<i32>()
        .expect("Invalid user id");
    let pen_name = args
        .value_of("pen-name")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Pen name"));
    let pen_name = validation::pen_name(&pen_name).expect("Invalid pen name");
    let bio = args.value_of("bio").map(String::from);

    let author = Author::create_for_user(conn, user_id, pen_name, bio)
        .expect("Couldn't promote the user");
    println!("Created author {} (id {})", author.pen_name, author.id);
}
