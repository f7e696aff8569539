use clap::{App, Arg, ArgMatches, SubCommand};
use folio_models::{
    users::{NewUser, Role, User},
    validation, Connection,
};
use std::io::{self, Write};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("users")
        .about("Manage users")
        .subcommand(
            SubCommand::with_name("new")
                .arg(
                    Arg::with_name("email")
                        .short("e")
                        .long("email")
                        .takes_value(true)
                        .help("Email address of the new user"),
                )
                .arg(
                    Arg::with_name("password")
                        .short("p")
                        .long("password")
                        .takes_value(true)
                        .help("The password of the new user"),
                )
                .arg(
                    Arg::with_name("phone")
                        .short("P")
                        .long("phone")
                        .takes_value(true)
                        .help("Phone number of the new user"),
                )
                .arg(
                    Arg::with_name("admin")
                        .short("a")
                        .long("admin")
                        .help("Makes the user an administrator"),
                )
                .about("Create a new user"),
        )
        .subcommand(SubCommand::with_name("list").about("List all users"))
        .subcommand(
            SubCommand::with_name("delete")
                .arg(
                    Arg::with_name("id")
                        .short("i")
                        .long("id")
                        .takes_value(true)
                        .help("The id of the user to delete"),
                )
                .arg(
                    Arg::with_name("yes")
                        .short("y")
                        .long("yes")
                        .help("Confirm the deletion"),
                )
                .about("Delete a user and everything they own"),
        )
        .subcommand(
            SubCommand::with_name("role")
                .arg(
                    Arg::with_name("id")
                        .short("i")
                        .long("id")
                        .takes_value(true)
                        .help("The id of the user"),
                )
                .arg(
                    Arg::with_name("role")
                        .short("r")
                        .long("role")
                        .takes_value(true)
                        .help("The new role (0 reader, 1 author, 2 admin)"),
                )
                .about("Change the role of a user"),
        )
}

pub fn run<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    match args.subcommand() {
        ("new", Some(x)) => new(x, conn),
        ("list", Some(_)) => list(conn),
        ("delete", Some(x)) => delete(x, conn),
        ("role", Some(x)) => role(x, conn),
        _ => println!("Unknown subcommand"),
    }
}

fn new<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let email = args
        .value_of("email")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Email address"));
    let email = validation::email(&email).expect("Invalid email address");
    let password = args.value_of("password").map(String::from).unwrap_or_else(|| {
        print!("Password: ");
        io::stdout().flush().expect("Couldn't flush STDOUT");
        rpassword::read_password().expect("Couldn't read your password.")
    });
    let password = validation::password(&password).expect("Password is too short");
    let phone = args
        .value_of("phone")
        .map(|phone| validation::phone(phone).expect("Invalid phone number"));
    let role = if args.is_present("admin") {
        Role::Admin
    } else {
        Role::Reader
    };

    let user = NewUser::create(conn, email, &password, phone, role)
        .expect("Couldn't save the new user");
    println!("Created user {} (id {})", user.email, user.id);
}

fn list(conn: &Connection) {
    let everyone = User::count(conn).expect("Couldn't count users") as i32;
    for user in User::page(conn, (0, everyone)).expect("Couldn't list users") {
        let role = if user.is_admin() {
            "admin"
        } else if user.is_author() {
            "author"
        } else {
            "reader"
        };
        println!("{}\t{}\t{}", user.id, user.email, role);
    }
}

fn delete<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let id = args
        .value_of("id")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("User id"))
        .parse::<i32>()
        .expect("Invalid user id");
    let user = User::get(conn, id).expect("User not found");
    if args.is_present("yes")
        || super::ask_for(&format!("Delete {}? (y/N)", user.email)) == "y"
    {
        user.delete(conn).expect("Couldn't delete the user");
        println!("Deleted {}", user.email);
    }
}

fn role<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let id = args
        .value_of("id")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("User id"))
        .parse::<i32>()
        .expect("Invalid user id");
    let new_role = args
        .value_of("role")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("New role (0, 1 or 2)"))
        .parse::<i32>()
        .ok()
        .and_then(|value| validation::role(value).ok())
        .expect("Invalid role");
    let user = User::get(conn, id).expect("User not found");
    user.update_role(conn, new_role)
        .expect("Couldn't update the role");
    println!("{} is now {:?}", user.email, new_role);
}
