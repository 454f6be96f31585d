//! Scripted terminal commands and their canned outputs.

use std::borrow::Cow;

/// Commands the typewriter picks from.
pub const COMMANDS: [&str; 10] = [
    "ls -la",
    "cat README.md",
    "git status",
    "npm run build",
    "whoami",
    "./deploy.sh",
    "ps aux",
    "tail -f logs/app.log",
    "ssh user@production",
    "docker ps",
];

/// Canned output for each command, keyed by exact command text.
pub const CANNED_OUTPUTS: [(&str, &str); 10] = [
    (
        "ls -la",
        "drwxr-xr-x 12 user user 4096 Dec 29 15:30 .\n\
         drwxr-xr-x  4 user user 4096 Dec 29 14:20 ..\n\
         -rw-r--r--  1 user user  452 Dec 29 15:30 index.html\n\
         -rw-r--r--  1 user user  234 Dec 29 15:25 style.css\n\
         -rw-r--r--  1 user user   89 Dec 29 15:20 package.json\n\
         drwxr-xr-x  2 user user 4096 Dec 29 15:10 assets/",
    ),
    (
        "cat README.md",
        "# Deepak G - Developer Portfolio\n\n\
         A modern, high-performance portfolio website...\n\n\
         > Building resilient digital systems with precision code.",
    ),
    (
        "git status",
        "On branch main\n\
         Your branch is up to date with 'origin/main'.\n\n\
         Changes to be committed:\n  \
         (use \"git reset HEAD <file>...\" to unstage)\n\n\
         \tmodified:   index.html\n\
         \tmodified:   style.css\n\n\
         Untracked files:\n  \
         (use \"git add <file>...\" to include in what will be committed)\n\n\
         \tterminal.js",
    ),
    (
        "npm run build",
        "> portfolio@1.0.0 build\n\
         > tailwindcss -i input.css -o style.css --minify\n\n\
         ✅ Build complete! Deploying to production...",
    ),
    (
        "whoami",
        "deepak-g\n\
         Full Stack Developer | System Architect\n\
         Currently: Available for new opportunities",
    ),
    (
        "./deploy.sh",
        "🚀 Deploying to production...\n\
         ✅ Code pushed to GitHub\n\
         ✅ Vercel deployment triggered\n\
         ✅ Site live at: https://deepak-g.vercel.app\n\
         ✅ Performance: 98/100 Lighthouse",
    ),
    (
        "ps aux",
        "USER       PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND\n\
         user      1234  2.1  1.2 456789 23456 pts/0    Sl   10:30   0:15 node server.js\n\
         deepak    5678  0.8  0.9 345678 19876 pts/1    S    11:45   0:08 tailwindcss --watch\n\
         deepak    9012  1.5  2.1 567890 45678 pts/2    Sl   12:00   0:22 code",
    ),
    (
        "tail -f logs/app.log",
        "[INFO] Server started on port 3000\n\
         [INFO] Database connected successfully\n\
         [INFO] All systems operational\n\
         [INFO] Portfolio deployed successfully",
    ),
    (
        "ssh user@production",
        "Welcome to Ubuntu 22.04.3 LTS (GNU/Linux 5.15.0-91-generic x86_64)\n\n \
         * Documentation:  https://help.ubuntu.com\n \
         * Management:     https://landscape.canonical.com\n \
         * Support:        https://ubuntu.com/advantage\n\n\
         Last login: Mon Dec 25 08:30:15 2024 from 192.168.1.100\n\
         user@production:~$ ",
    ),
    (
        "docker ps",
        "CONTAINER ID   IMAGE          COMMAND                  CREATED         STATUS         PORTS                    NAMES\n\
         1a2b3c4d5e6f   nginx:alpine   \"nginx -g 'daemon of…\"   2 hours ago     Up 2 hours     0.0.0.0:80->80/tcp       portfolio-web\n\
         2b3c4d5e6f7a   postgres:15    \"docker-entrypoint.s…\"   2 hours ago     Up 2 hours     5432/tcp                 portfolio-db\n\
         3c4d5e6f7a8b   redis:7        \"docker-entrypoint.s…\"   2 hours ago     Up 2 hours     6379/tcp                 portfolio-cache",
    ),
];

/// Canned output for `command`, if the table has one.
pub fn canned_output(command: &str) -> Option<&'static str> {
    CANNED_OUTPUTS
        .iter()
        .find(|(known, _)| *known == command)
        .map(|(_, output)| *output)
}

/// Output shown after `command` finishes typing.
///
/// Unknown commands get a generic success message.
pub fn output_for(command: &str) -> Cow<'static, str> {
    match canned_output(command) {
        Some(output) => Cow::Borrowed(output),
        None => Cow::Owned(format!("Command executed: {command}\nStatus: Success")),
    }
}
