//! cli::usage
//!
//! Usage text printed for `help`, `-h`, `--help`, no arguments and unknown
//! commands.

/// Full usage text.
pub const USAGE: &str = "\
Windows向け軽量Gitコマンド（Git非依存版）
使用方法:
  git-cli status          - 作業ディレクトリの状態を表示
  git-cli add <ファイル>   - ファイルをステージングエリアに追加
  git-cli commit -m <メッセージ> - 変更をコミット
  git-cli push            - リモートリポジトリにプッシュ
  git-cli pull            - リモートリポジトリから取得
  git-cli log             - コミット履歴を表示
  git-cli clone <URL>     - リポジトリをクローン
  git-cli help            - このヘルプを表示";

/// Print the usage text. Shown even in quiet mode since it was asked for.
pub fn print_usage() {
    println!("{}", USAGE);
}

/// Report an unknown command followed by the usage text.
pub fn print_unknown_command(name: &str) {
    println!("不明なコマンド: {}", name);
    print_usage();
}

/// Report an option with a missing or malformed value, then the usage text.
pub fn print_invalid_option(name: &str) {
    println!("オプションの値が不正です: {}", name);
    print_usage();
}
