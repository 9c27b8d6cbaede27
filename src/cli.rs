//! Numbered console menu over a [`Session`].
//!
//! Nodes can be entered by name or by 0-based index. End of input behaves
//! like choosing `0`.

use log::debug;
use std::collections::HashSet;
use std::io::{BufRead, Write};

use crate::cluster::KMedoidsConfig;
use crate::error::{Error, Result};
use crate::graph::parse_skill_set;
use crate::report;
use crate::session::{Session, SiteCategory};

const MENU: &str = "\nSelect a function:\n\
                    1. Rebuild communication infrastructure\n\
                    2. Plan evacuation routes\n\
                    3. Plan routes for emergency services\n\
                    4. Set up supply points\n\
                    5. Deployment planning for emergency services\n\
                    6. Evacuation routes over open roads\n\
                    7. Block road\n\
                    8. Unblock road\n\
                    9. Set priority node\n\
                    10. Show network\n\
                    11. Show routing graph\n\
                    0. Exit\n";

pub struct Menu<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Menu {
            session,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `0` or end of input.
    ///
    /// Bad choices and failed analyses are reported on the output and the
    /// loop continues.
    ///
    /// # Errors
    /// * `Io` if reading input or writing output fails
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.output.write_all(MENU.as_bytes())?;
            self.output.flush()?;
            let Some(line) = self.next_line()? else {
                break;
            };
            let choice = line.trim();
            debug!("menu choice {choice:?}");
            let outcome = match choice {
                "0" => break,
                "1" => self.rebuild_infrastructure(),
                "2" => self.plan_evacuation(),
                "3" => self.emergency_routes(),
                "4" => self.supply_points(),
                "5" => self.allocate_teams(),
                "6" => self.open_road_routes(),
                "7" => self.set_road(true),
                "8" => self.set_road(false),
                "9" => self.set_priority(),
                "10" => self.show_network(),
                "11" => self.show_routing(),
                _ => Err(Error::invalid_input(format!("invalid choice {choice:?}"))),
            };
            match outcome {
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => writeln!(self.output, "Error: {e}")?,
                Ok(()) => {}
            }
        }
        writeln!(self.output, "Exiting...")?;
        Ok(())
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.next_line()?
            .ok_or_else(|| Error::invalid_input("unexpected end of input"))
    }

    fn prompt_number(&mut self, text: &str) -> Result<usize> {
        let answer = self.prompt(text)?;
        answer
            .trim()
            .parse()
            .map_err(|_| Error::invalid_input(format!("expected a number, got {answer:?}")))
    }

    fn prompt_vertex(&mut self, text: &str) -> Result<usize> {
        let answer = self.prompt(text)?;
        let token = answer.trim();
        let names = self.session.names();
        if let Some(v) = names.iter().position(|name| name == token) {
            return Ok(v);
        }
        let v: usize = token
            .parse()
            .map_err(|_| Error::invalid_input(format!("unknown node {token:?}")))?;
        Error::check_index(v, names.len())?;
        Ok(v)
    }

    fn rebuild_infrastructure(&mut self) -> Result<()> {
        let mst = self.session.rebuild_infrastructure()?;
        let text = report::render_mst(self.session.names(), &mst);
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn plan_evacuation(&mut self) -> Result<()> {
        let paths = self.session.plan_evacuation()?;
        let text = report::render_paths(self.session.names(), &paths)?;
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn open_road_routes(&mut self) -> Result<()> {
        let paths = self.session.evacuation_routes()?;
        let text = report::render_paths(self.session.names(), &paths)?;
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn emergency_routes(&mut self) -> Result<()> {
        let routes = self.session.emergency_routes()?;
        let text = report::render_emergency_routes(self.session.names(), &routes);
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn supply_points(&mut self) -> Result<()> {
        let k = self.prompt_number("Enter the number of clusters (k): ")?;
        writeln!(self.output, "Running K-Medoids clustering...")?;
        let clustering = self.session.supply_points(&KMedoidsConfig::new(k))?;
        let text = report::render_clusters(self.session.names(), &clustering);
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn read_skill_sets(&mut self, label: &str, count: usize) -> Result<Vec<HashSet<String>>> {
        (1..=count)
            .map(|i| Ok(parse_skill_set(&self.prompt(&format!("{label} {i}: "))?)))
            .collect()
    }

    fn allocate_teams(&mut self) -> Result<()> {
        let teams = self.prompt_number("Enter the number of teams: ")?;
        writeln!(self.output, "Enter skills of each team (comma-separated):")?;
        let skills = self.read_skill_sets("Team", teams)?;

        let nodes = self.prompt_number("Enter the number of nodes: ")?;
        writeln!(self.output, "Enter requirements of each node (comma-separated):")?;
        let requirements = self.read_skill_sets("Node", nodes)?;

        let (flow, allocation) = self.session.allocate_teams(&skills, &requirements)?;
        let text = report::render_allocation(flow, &allocation);
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn set_road(&mut self, blocked: bool) -> Result<()> {
        let a = self.prompt_vertex("Enter first node: ")?;
        let b = self.prompt_vertex("Enter second node: ")?;
        let changed = if blocked {
            self.session.block_road(a, b)?
        } else {
            self.session.unblock_road(a, b)?
        };
        let names = self.session.names();
        let (a, b) = (&names[a], &names[b]);
        match (changed, blocked) {
            (false, _) => writeln!(self.output, "No road between {a} and {b}")?,
            (true, true) => writeln!(self.output, "Blocked road between {a} and {b}")?,
            (true, false) => writeln!(self.output, "Unblocked road between {a} and {b}")?,
        }
        Ok(())
    }

    fn set_priority(&mut self) -> Result<()> {
        let vertex = self.prompt_vertex("Enter node: ")?;
        let choice = self.prompt_number(
            "Category (1 rescue station, 2 hospital, 3 government building, 4 standard): ",
        )?;
        let category = SiteCategory::from_choice(u32::try_from(choice).unwrap_or(0));
        self.session.mark_priority(vertex, category)?;
        writeln!(
            self.output,
            "{} set as priority {category}",
            self.session.names()[vertex]
        )?;
        Ok(())
    }

    fn show_network(&mut self) -> Result<()> {
        let text = report::render_roads(self.session.roads());
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn show_routing(&mut self) -> Result<()> {
        let text = report::render_network(self.session.routing());
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}
