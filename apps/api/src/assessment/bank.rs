//! Static question and scenario bank.
//!
//! Answer keys never leave the server for candidate-facing flows: handlers hand
//! out `QuestionView`s, and grading reads `Question::correct` from here.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::models::profile::TechPath;

/// Number of questions a candidate is asked per quiz attempt.
pub const QUESTIONS_PER_QUIZ: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
}

/// A question as shown to a candidate, without its answer.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub text: &'static str,
    pub options: [&'static str; 4],
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text,
            options: q.options,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminalStep {
    pub instruction: &'static str,
    /// Exact commands, or prefixes when the entry ends in `*`.
    pub valid_commands: &'static [&'static str],
    pub success_message: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminalScenario {
    pub id: &'static str,
    pub steps: &'static [TerminalStep],
}

const fn q(id: u32, text: &'static str, options: [&'static str; 4], correct: usize) -> Question {
    Question {
        id,
        text,
        options,
        correct,
    }
}

static DEV_BANK: [Question; 10] = [
    q(1, "What is the complexity of binary search?", ["O(n)", "O(log n)", "O(n^2)", "O(1)"], 1),
    q(2, "Which HTTP method is idempotent?", ["POST", "PUT", "PATCH", "CONNECT"], 1),
    q(3, "What does DOM stand for?", ["Document Object Model", "Data Object Model", "Digital Object Mode", "Document Orientation Model"], 0),
    q(4, "In React, what hook manages side effects?", ["useState", "useContext", "useEffect", "useReducer"], 2),
    q(5, "What is a Closure?", ["A function with preserved data", "A database connection", "A closing tag", "A CSS property"], 0),
    q(6, "What is the virtual DOM?", ["A direct copy of the DOM", "A lightweight copy of the DOM", "A database", "A browser plugin"], 1),
    q(7, "Which keyword declares a constant in JS?", ["var", "let", "const", "static"], 2),
    q(8, "What is 'Hoisting'?", ["Lifting weights", "Moving declarations to top", "Deleting variables", "Hiding variables"], 1),
    q(9, "What is a Promise?", ["A guarantee", "An object representing async completion", "A function", "A loop"], 1),
    q(10, "What is JSX?", ["Java Syntax Extension", "JavaScript XML", "JSON XML", "Java Standard XML"], 1),
];

static DATA_BANK: [Question; 10] = [
    q(1, "Which library is standard for DataFrames?", ["NumPy", "Pandas", "Matplotlib", "Scikit-learn"], 1),
    q(2, "What is Overfitting?", ["Model is too simple", "Model learns noise", "Model is perfect", "Model is under-trained"], 1),
    q(3, "SQL command to remove duplicates?", ["UNIQUE", "DISTINCT", "DIFFERENT", "REMOVE"], 1),
    q(4, "Which is a supervised learning algorithm?", ["K-Means", "Linear Regression", "Apriori", "PCA"], 1),
    q(5, "What does ETL stand for?", ["Extract Transform Load", "Execute Test Load", "Extract Test Load", "Execute Transform Load"], 0),
    q(6, "What is a Null hypothesis?", ["The hypothesis to be tested", "A hypothesis with no data", "A wrong hypothesis", "A hypothesis about nulls"], 0),
    q(7, "What is Normalization?", ["Scaling data to 0-1", "Removing data", "Adding noise", "Sorting data"], 0),
    q(8, "Which plot is best for distribution?", ["Scatter", "Histogram", "Line", "Pie"], 1),
    q(9, "What is 'JOIN' in SQL?", ["Combining rows from tables", "Deleting tables", "Creating tables", "Sorting tables"], 0),
    q(10, "What is a Tensor?", ["A number", "A multi-dimensional array", "A function", "A neural network"], 1),
];

static QA_BANK: [Question; 10] = [
    q(1, "What is Black Box Testing?", ["Testing internal logic", "Testing without internal knowledge", "Testing security", "Testing performance"], 1),
    q(2, "Tool for API Testing?", ["Selenium", "Postman", "Appium", "JIRA"], 1),
    q(3, "What is Regression Testing?", ["Testing new features", "Testing bug fixes don't break existing", "Testing performance", "Testing UI"], 1),
    q(4, "Which is a valid HTTP status for Not Found?", ["200", "500", "404", "403"], 2),
    q(5, "What is a Test Case?", ["A bug report", "A set of conditions to verify", "A test plan", "A test strategy"], 1),
    q(6, "What is Smoke Testing?", ["Testing firewalls", "Preliminary testing to reveal simple failures", "Testing performance", "Testing smoke detectors"], 1),
    q(7, "What is Selenium used for?", ["Unit testing", "Web browser automation", "API testing", "Mobile testing"], 1),
    q(8, "What is a Bug Life Cycle?", ["Stages a bug goes through", "A biology term", "Software development cycle", "Testing cycle"], 0),
    q(9, "Difference between Severity and Priority?", ["Same thing", "Impact vs Urgency", "Size vs Weight", "Color vs Shape"], 1),
    q(10, "What is UAT?", ["User Acceptance Testing", "Unit Automated Testing", "User Automated Testing", "Unified Acceptance Testing"], 0),
];

static DESIGN_BANK: [Question; 10] = [
    q(1, "What is the Golden Ratio?", ["1:1.618", "1:1.5", "1:2", "1:1.414"], 0),
    q(2, "Which tool is best for vector graphics?", ["Photoshop", "Illustrator", "Premiere", "Lightroom"], 1),
    q(3, "What does RGB stand for?", ["Red Green Blue", "Red Gold Black", "Real Graphic Base", "Red Gray Blue"], 0),
    q(4, "What is Kerning?", ["Line spacing", "Letter spacing between pairs", "Font size", "Paragraph spacing"], 1),
    q(5, "Primary color model for print?", ["RGB", "CMYK", "HEX", "HSL"], 1),
    q(6, "What is White Space?", ["Empty area in design", "White color", "A mistake", "Background"], 0),
    q(7, "What is a Wireframe?", ["A skeletal framework", "A final design", "A code structure", "A 3D model"], 0),
    q(8, "What is Contrast?", ["Difference in visual properties", "Similarity", "Brightness", "Size"], 0),
    q(9, "What file format supports transparency?", ["JPG", "PNG", "BMP", "TXT"], 1),
    q(10, "What is Typography?", ["Study of maps", "Art of arranging type", "Type of photography", "Typing speed"], 1),
];

static DEFAULT_BANK: [Question; 5] = [
    q(1, "What is Git?", ["A database", "Version Control System", "IDE", "OS"], 1),
    q(2, "What port is HTTP?", ["80", "443", "22", "8080"], 0),
    q(3, "What does API stand for?", ["Application Programming Interface", "Apple Pie Ingredients", "Advanced Protocol Interface", "App Program Interact"], 0),
    q(4, "Which is NOT a programming language?", ["Java", "Python", "HTML", "C++"], 2),
    q(5, "What is Docker?", ["A container platform", "A database", "A code editor", "A game"], 0),
];

static SCENARIOS: [TerminalScenario; 2] = [
    TerminalScenario {
        id: "basics",
        steps: &[
            TerminalStep {
                instruction: "List all files (including hidden ones).",
                valid_commands: &["ls -la", "ls -a", "ll"],
                success_message: "drwxr-xr-x  .config\n-rw-r--r--  .bashrc\ndrwxr-xr-x  workspace",
                hint: "Try 'ls' with flags like -a",
            },
            TerminalStep {
                instruction: "Create a directory named 'proyectos'.",
                valid_commands: &["mkdir proyectos", "mkdir \"proyectos\"", "mkdir 'proyectos'"],
                success_message: "[SUCCESS] Directory 'proyectos' created.",
                hint: "Use 'mkdir <name>'",
            },
            TerminalStep {
                instruction: "Check running processes.",
                valid_commands: &["ps", "ps aux", "top", "htop"],
                success_message: "PID TTY          TIME CMD\n123 pts/0    00:00:00 bash",
                hint: "Try 'ps' or 'top'",
            },
        ],
    },
    TerminalScenario {
        id: "file_ops",
        steps: &[
            TerminalStep {
                instruction: "Print current working directory.",
                valid_commands: &["pwd"],
                success_message: "/home/user/workspace",
                hint: "Command starts with 'p'",
            },
            TerminalStep {
                instruction: "Create an empty file named 'log.txt'.",
                valid_commands: &["touch log.txt", "touch ./log.txt"],
                success_message: "[SUCCESS] File 'log.txt' created.",
                hint: "Use 'touch'",
            },
            TerminalStep {
                instruction: "Remove the file 'log.txt'.",
                valid_commands: &["rm log.txt", "rm ./log.txt"],
                success_message: "[SUCCESS] File 'log.txt' removed.",
                hint: "Use 'rm'",
            },
        ],
    },
];

/// Returns the quiz bank for a path. Paths without a dedicated bank, and
/// profiles that never picked a path, get the general default bank.
pub fn quiz_bank(path: Option<TechPath>) -> &'static [Question] {
    match path {
        Some(TechPath::Dev) => &DEV_BANK[..],
        Some(TechPath::Data) => &DATA_BANK[..],
        Some(TechPath::Qa) => &QA_BANK[..],
        Some(TechPath::Design) => &DESIGN_BANK[..],
        _ => &DEFAULT_BANK[..],
    }
}

/// Question id → index of the correct option.
pub fn answer_key(path: Option<TechPath>) -> HashMap<u32, usize> {
    quiz_bank(path).iter().map(|q| (q.id, q.correct)).collect()
}

/// Picks `n` distinct questions uniformly at random. `n` is clamped to the bank size.
pub fn sample_questions(path: Option<TechPath>, n: usize) -> Vec<&'static Question> {
    let bank = quiz_bank(path);
    let mut rng = rand::thread_rng();
    bank.choose_multiple(&mut rng, n.min(bank.len())).collect()
}

pub fn terminal_scenarios() -> &'static [TerminalScenario] {
    &SCENARIOS
}

pub fn scenario(id: &str) -> Option<&'static TerminalScenario> {
    terminal_scenarios().iter().find(|s| s.id == id)
}

pub fn random_scenario() -> &'static TerminalScenario {
    let mut rng = rand::thread_rng();
    terminal_scenarios()
        .choose(&mut rng)
        .unwrap_or(&SCENARIOS[0])
}
